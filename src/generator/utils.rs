use std::{fs::File, path::Path};

use anyhow::Context;
use maud::html;
use pulldown_cmark::{html as cmark_html, Options, Parser};

use crate::pagination::{page_href, Pagination};

/// `<` first page, the window of page numbers, `>` last page.
pub(super) fn render_pagination(p: &Pagination) -> String {
    html! {
        nav.pagination aria-label="Pagination" {
            a.page-link href="/" aria-disabled=[p.is_first().then_some("true")] { "<" }
            @for n in &p.window {
                @if *n == p.page {
                    a.page-link.current href=(page_href(*n)) aria-current="page" { (n) }
                } @else {
                    a.page-link href=(page_href(*n)) { (n) }
                }
            }
            a.page-link href=(page_href(p.total_pages)) aria-disabled=[p.is_last().then_some("true")] { ">" }
        }
    }
    .into()
}

pub(super) fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut body = String::new();
    cmark_html::push_html(&mut body, Parser::new_ext(source, options));
    body
}

/// Creates `path` and its parent directories for writing.
pub(super) fn create_output(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("while creating {parent:?}"))?;
    }
    File::create(path).with_context(|| format!("while creating {path:?}"))
}
