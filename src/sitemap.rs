use chrono::NaiveDate;
use log::warn;
use maud::{html, PreEscaped};

use crate::{
    metadata::PostMeta,
    pagination::{page_href, total_pages},
};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlEntry {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
    pub lastmod: Option<String>,
}

/// `YYYY-MM-DD` to midnight UTC in the `toISOString` shape. Calendar-invalid
/// dates yield `None`.
pub(crate) fn lastmod(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
}

/// Home, index pages `2..=total_pages`, then every post in listing order.
pub(crate) fn entries(site_url: &str, posts: &[PostMeta], page_size: usize) -> Vec<UrlEntry> {
    let mut urls = vec![UrlEntry {
        loc: format!("{site_url}/"),
        changefreq: "weekly",
        priority: "1.0",
        lastmod: None,
    }];

    urls.extend((2..=total_pages(posts.len(), page_size)).map(|page| UrlEntry {
        loc: format!("{site_url}{}", page_href(page)),
        changefreq: "weekly",
        priority: "0.6",
        lastmod: None,
    }));

    urls.extend(posts.iter().map(|post| {
        let lastmod = if post.date.is_empty() {
            None
        } else {
            let stamp = lastmod(&post.date);
            if stamp.is_none() {
                warn!("{} has an invalid date({}). lastmod is omitted.", post.slug, post.date);
            }
            stamp
        };
        UrlEntry {
            loc: format!("{site_url}/posts/{}", post.slug),
            changefreq: "monthly",
            priority: "0.8",
            lastmod,
        }
    }));

    urls
}

pub(crate) fn render(urls: &[UrlEntry]) -> String {
    html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        "\n"
        urlset xmlns=(SITEMAP_NS) {
            @for u in urls {
                url {
                    loc { (u.loc) }
                    @if let Some(modified) = &u.lastmod {
                        lastmod { (modified) }
                    }
                    changefreq { (u.changefreq) }
                    priority { (u.priority) }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(slug: &str, date: &str) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            date: date.to_string(),
            title: "t".to_string(),
            excerpt: String::new(),
        }
    }

    #[test]
    fn lastmod_format() {
        assert_eq!(
            lastmod("2025-07-29").as_deref(),
            Some("2025-07-29T00:00:00.000Z")
        );
        assert_eq!(lastmod("9999-99-99"), None);
        assert_eq!(lastmod(""), None);
    }

    #[test]
    fn enumerates_home_pages_and_posts() {
        let posts = vec![
            meta("2025-02-01-b", "2025-02-01"),
            meta("2025-01-01-a", "2025-01-01"),
            meta("notes", ""),
        ];
        let urls = entries("https://blog.example", &posts, 1);
        let locs: Vec<&str> = urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://blog.example/",
                "https://blog.example/page/2",
                "https://blog.example/page/3",
                "https://blog.example/posts/2025-02-01-b",
                "https://blog.example/posts/2025-01-01-a",
                "https://blog.example/posts/notes",
            ]
        );
        assert_eq!(urls[0].priority, "1.0");
        assert_eq!(urls[1].changefreq, "weekly");
        assert_eq!(urls[3].changefreq, "monthly");
        assert_eq!(urls[3].lastmod.as_deref(), Some("2025-02-01T00:00:00.000Z"));
        assert_eq!(urls[5].lastmod, None);
    }

    #[test]
    fn single_page_has_no_index_pages() {
        let urls = entries("http://localhost:3000", &[meta("a", "")], 5);
        assert_eq!(urls.len(), 2);
        assert!(entries("http://localhost:3000", &[], 5).len() == 1);
    }

    #[test]
    fn renders_xml() {
        let urls = vec![
            UrlEntry {
                loc: "http://x/".to_string(),
                changefreq: "weekly",
                priority: "1.0",
                lastmod: None,
            },
            UrlEntry {
                loc: "http://x/posts/a&b".to_string(),
                changefreq: "monthly",
                priority: "0.8",
                lastmod: Some("2025-01-01T00:00:00.000Z".to_string()),
            },
        ];
        let xml = render(&urls);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<url><loc>http://x/</loc><changefreq>weekly</changefreq><priority>1.0</priority></url>"));
        assert!(xml.contains("<loc>http://x/posts/a&amp;b</loc><lastmod>2025-01-01T00:00:00.000Z</lastmod>"));
        assert!(xml.ends_with("</urlset>"));
    }
}
