//! Atom feed of the blog, newest post first.

use atom_syndication::{EntryBuilder, Feed, FeedBuilder, FixedDateTime, LinkBuilder, Text};
use chrono::{NaiveDate, Utc};

use crate::metadata::PostMeta;

/// Midnight UTC of the post date, if it is a real calendar date.
fn post_updated(date: &str) -> Option<FixedDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

pub(crate) fn build_feed(blog_name: &str, site_url: &str, posts: &[PostMeta]) -> Feed {
    let now = Utc::now().fixed_offset();

    let entries = posts
        .iter()
        .map(|post| {
            let url = format!("{site_url}/posts/{}", post.slug);
            EntryBuilder::default()
                .title(post.title.clone())
                .id(url.clone())
                .updated(post_updated(&post.date).unwrap_or(now))
                .links(vec![LinkBuilder::default().href(url).rel("alternate").build()])
                .summary((!post.excerpt.is_empty()).then(|| Text::plain(post.excerpt.clone())))
                .build()
        })
        .collect::<Vec<_>>();

    // entries are sorted, so the first dated one is the latest update
    let updated = posts
        .iter()
        .find_map(|post| post_updated(&post.date))
        .unwrap_or(now);

    FeedBuilder::default()
        .title(blog_name.to_string())
        .id(format!("{site_url}/"))
        .updated(updated)
        .links(vec![LinkBuilder::default()
            .href(format!("{site_url}/"))
            .rel("alternate")
            .build()])
        .entries(entries)
        .build()
}
