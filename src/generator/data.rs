use serde::Serialize;

use crate::{
    metadata::{Post, PostMeta},
    posts::Neighbors,
};

#[derive(Serialize, Debug)]
pub(super) struct Site<'a> {
    pub blog_name: &'a str,
    pub blog_description: &'a str,
    pub site_url: &'a str,
    pub year: i32,
}

#[derive(Serialize, Debug)]
pub(super) struct IndexPageData<'a> {
    pub site: &'a Site<'a>,
    pub posts: &'a [PostMeta],
    pub page: usize,
    pub total_pages: usize,
    /// Pre-rendered navigation bar.
    pub pagination: String,
}

#[derive(Serialize, Debug)]
pub(super) struct PostPageData<'a> {
    pub site: &'a Site<'a>,
    pub post: &'a Post,
    /// Second index page, or the home page when there is only one.
    pub all_posts_href: String,
    #[serde(flatten)]
    pub neighbors: Neighbors,
}

#[derive(Serialize, Debug)]
pub(super) struct AboutPageData<'a> {
    pub site: &'a Site<'a>,
    pub title: String,
    pub body: String,
}
