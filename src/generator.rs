use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Datelike, Utc};
use fs_extra::dir::CopyOptions;
use log::{debug, info, warn};

use crate::{
    context::Context,
    feed, metadata,
    metadata::PostMeta,
    pagination::{page_href, total_pages, Pagination},
    posts, sitemap,
};

use self::{
    data::{AboutPageData, IndexPageData, PostPageData, Site},
    utils::{create_output, render_markdown, render_pagination},
};

mod data;
mod utils;

/// Counts of what a build wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub index_pages: usize,
    pub post_pages: usize,
    pub sitemap_urls: usize,
}

fn index_page_path(page: usize) -> PathBuf {
    if page <= 1 {
        PathBuf::from("index.html")
    } else {
        PathBuf::from("page").join(page.to_string()).join("index.html")
    }
}

fn generate_index_pages(ctx: &Context, site: &Site, metas: &[PostMeta]) -> anyhow::Result<usize> {
    let pages = total_pages(metas.len(), ctx.page_size);
    for page in 1..=pages {
        let p = Pagination::plan(metas.len(), ctx.page_size, page);
        let data = IndexPageData {
            site,
            posts: &metas[p.slice.clone()],
            page: p.page,
            total_pages: p.total_pages,
            pagination: render_pagination(&p),
        };

        let path = ctx.out_dir.join(index_page_path(page));
        debug!("Writing {path:?}...");
        ctx.handlebars
            .render_to_write("index", &data, create_output(&path)?)
            .with_context(|| format!("while generating index page {page}"))?;
    }
    Ok(pages)
}

fn generate_post_pages(ctx: &Context, site: &Site, metas: &[PostMeta]) -> anyhow::Result<usize> {
    let all_posts_href = page_href(total_pages(metas.len(), ctx.page_size).min(2));
    let mut written = 0;
    for meta in metas {
        let Some(post) = posts::read_post(&ctx.post_dir, &meta.slug)? else {
            warn!("{} disappeared while generating. skipping...", meta.slug);
            continue;
        };
        let data = PostPageData {
            site,
            post: &post,
            all_posts_href: all_posts_href.clone(),
            neighbors: posts::neighbors(metas, &meta.slug),
        };

        let path = ctx
            .out_dir
            .join("posts")
            .join(&meta.slug)
            .join("index.html");
        debug!("Writing {path:?}...");
        ctx.handlebars
            .render_to_write("post", &data, create_output(&path)?)
            .with_context(|| format!("while generating from {}", meta.slug))?;
        written += 1;
    }
    Ok(written)
}

fn default_about(blog_name: &str) -> String {
    format!(
        "# About {blog_name}\n\n\
         {blog_name} is a cybersecurity news website dedicated to providing the latest \
         information and insights on cybersecurity threats, vulnerabilities, and best \
         practices. Our mission is to help individuals and organizations stay secure and \
         informed in the ever-evolving digital landscape.\n\n\
         We cover a wide range of topics, including ransomware, malware, phishing, data \
         breaches, and more.\n"
    )
}

fn generate_about_page(ctx: &Context, site: &Site) -> anyhow::Result<()> {
    let source = match &ctx.about_file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?
        }
        None => default_about(&ctx.blog_name),
    };
    let body = render_markdown(&source);
    let data = AboutPageData {
        site,
        title: metadata::extract_title(&body),
        body,
    };

    let path = ctx.out_dir.join("about").join("index.html");
    ctx.handlebars
        .render_to_write("about", &data, create_output(&path)?)
        .context("while generating about page")?;
    Ok(())
}

fn generate_sitemap(ctx: &Context, metas: &[PostMeta]) -> anyhow::Result<usize> {
    let urls = sitemap::entries(&ctx.site_url, metas, ctx.page_size);
    let path = ctx.out_dir.join("sitemap.xml");
    std::fs::write(&path, sitemap::render(&urls))
        .with_context(|| format!("while writing {path:?}"))?;
    Ok(urls.len())
}

fn generate_feed(ctx: &Context, metas: &[PostMeta]) -> anyhow::Result<()> {
    let path = ctx.out_dir.join("feed.xml");
    feed::build_feed(&ctx.blog_name, &ctx.site_url, metas)
        .write_to(create_output(&path)?)
        .with_context(|| format!("while writing {path:?}"))?;
    Ok(())
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<Summary> {
    fs_extra::dir::remove(&ctx.out_dir)
        .with_context(|| format!("while cleaning {:?}", ctx.out_dir))?;
    fs_extra::dir::create_all(&ctx.out_dir, false)?;

    // copy `public_dir`
    let mut cp_opts = CopyOptions::new();
    cp_opts.copy_inside = true;
    cp_opts.content_only = true;
    cp_opts.overwrite = true;
    fs_extra::dir::copy(&ctx.public_dir, &ctx.out_dir, &cp_opts)
        .with_context(|| format!("while copying {:?}", ctx.public_dir))?;

    let metas = posts::read_all_meta(&ctx.post_dir)?;
    info!("{} posts found in {:?}", metas.len(), ctx.post_dir);

    let site = Site {
        blog_name: &ctx.blog_name,
        blog_description: &ctx.blog_description,
        site_url: &ctx.site_url,
        year: Utc::now().year(),
    };

    let summary = Summary {
        index_pages: generate_index_pages(ctx, &site, &metas)?,
        post_pages: generate_post_pages(ctx, &site, &metas)?,
        sitemap_urls: generate_sitemap(ctx, &metas)?,
    };
    generate_about_page(ctx, &site)?;
    generate_feed(ctx, &metas)?;

    info!(
        "Generated {} index pages, {} posts and {} sitemap entries into {:?}",
        summary.index_pages, summary.post_pages, summary.sitemap_urls, ctx.out_dir
    );
    Ok(summary)
}
