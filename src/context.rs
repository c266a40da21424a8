use std::path::PathBuf;

pub(crate) const DEFAULT_BLOG_NAME: &str = "BitBase";
pub(crate) const DEFAULT_BLOG_DESCRIPTION: &str = "Stay Secure. Stay Informed.";
pub(crate) const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug)]
pub(crate) struct Context {
    pub post_dir: PathBuf,
    pub out_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Markdown source of the about page. A built-in page is used when unset.
    pub about_file: Option<PathBuf>,

    pub blog_name: String,
    pub blog_description: String,
    /// Absolute, without trailing slash.
    pub site_url: String,
    pub page_size: usize,

    pub handlebars: handlebars::Handlebars<'static>,
}

pub(crate) fn normalize_site_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
