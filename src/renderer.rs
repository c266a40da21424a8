use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};

handlebars_helper!(post_href: |slug: str| format!("/posts/{}", slug));

pub(crate) fn generate_renderer(template_dir: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = handlebars::Handlebars::new();
    handlebars.register_helper("post_href", Box::new(post_href));
    handlebars
        .register_template_file("index", template_dir.join("index.hbs"))
        .context("index.hbs")?;
    handlebars
        .register_template_file("post", template_dir.join("post.hbs"))
        .context("post.hbs")?;
    handlebars
        .register_template_file("about", template_dir.join("about.hbs"))
        .context("about.hbs")?;
    handlebars.register_partial(
        "layout",
        std::fs::read_to_string(template_dir.join("layout.hbs")).context("layout.hbs")?,
    )?;

    Ok(handlebars)
}
