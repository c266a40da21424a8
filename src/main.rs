use anyhow::{bail, Context as _};
use clap::{command, Arg};
use context::Context;
use generator::generate;
use log::info;
use std::path::PathBuf;

mod context;
mod feed;
mod generator;
mod metadata;
mod pagination;
mod posts;
mod renderer;
mod sitemap;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args([
            Arg::new("post_dir")
                .help("Directory path of HTML posts. A missing directory builds an empty blog.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("posts"),
            Arg::new("out_dir")
                .help("Directory path of output. Existing contents will be removed.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("out"),
            Arg::new("public_dir")
                .help("Directory path of public. Contents will be copied as it is.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("public"),
            Arg::new("template_dir")
                .help("Directory of template")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("template"),
            Arg::new("page_size")
                .long("page-size")
                .help("Number of posts per index page")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
            Arg::new("about")
                .long("about")
                .help("Markdown file rendered as the about page")
                .value_parser(clap::value_parser!(PathBuf)),
        ])
        .get_matches();

    let post_dir: &PathBuf = matches.get_one("post_dir").context("post_dir")?;
    if post_dir.exists() && !post_dir.is_dir() {
        bail!("if post_dir exists, it must be a directory.");
    }
    let out_dir: &PathBuf = matches.get_one("out_dir").context("out_dir")?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let public_dir: &PathBuf = matches.get_one("public_dir").context("public_dir")?;
    if !public_dir.is_dir() {
        bail!("public_dir must be a directory.")
    }
    let template_dir: &PathBuf = matches.get_one("template_dir").context("template_dir")?;
    if !template_dir.is_dir() {
        bail!("template_dir must be a directory.")
    }
    let page_size = *matches.get_one::<usize>("page_size").context("page_size")?;
    if page_size == 0 {
        bail!("page-size must be at least 1.")
    }
    let about_file = matches.get_one::<PathBuf>("about");
    if let Some(about) = about_file {
        if !about.is_file() {
            bail!("about must be a file.")
        }
    }

    let ctx = Context {
        post_dir: post_dir.to_owned(),
        out_dir: out_dir.to_owned(),
        public_dir: public_dir.to_owned(),
        about_file: about_file.cloned(),
        blog_name: std::env::var("BLOG_NAME")
            .unwrap_or_else(|_| context::DEFAULT_BLOG_NAME.to_string()),
        blog_description: std::env::var("BLOG_DESCRIPTION")
            .unwrap_or_else(|_| context::DEFAULT_BLOG_DESCRIPTION.to_string()),
        site_url: context::normalize_site_url(
            &std::env::var("SITE_URL").unwrap_or_else(|_| context::DEFAULT_SITE_URL.to_string()),
        ),
        page_size,
        handlebars: renderer::generate_renderer(template_dir)?,
    };
    info!("Building {} for {}", ctx.blog_name, ctx.site_url);

    generate(&ctx)?;

    Ok(())
}
