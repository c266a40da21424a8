use std::{cmp::Ordering, io::ErrorKind, path::Path};

use anyhow::Context;
use log::{debug, warn};
use serde::Serialize;

use crate::metadata::{self, Post, PostMeta};

/// Reference to an adjacent post, enough to render a link.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Neighbor {
    pub slug: String,
    pub title: String,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Neighbors {
    /// The older post.
    pub prev: Option<Neighbor>,
    /// The newer post.
    pub next: Option<Neighbor>,
}

const POST_EXTENSION: &str = ".html";

/// Newest first. Two dated posts compare by date, anything else by slug,
/// descending. Equal dates keep their input order.
///
/// A dated slug starts with its date, so slug order agrees with date order
/// whenever the dates differ and the comparison stays total.
pub(crate) fn sort_post<T: std::borrow::Borrow<PostMeta>>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.borrow(), b.borrow());
    if !a.date.is_empty() && !b.date.is_empty() {
        b.date.cmp(&a.date)
    } else {
        b.slug.cmp(&a.slug)
    }
}

/// Reads every post in `post_dir`. A missing directory is an empty blog.
pub(crate) fn read_all_meta(post_dir: &Path) -> anyhow::Result<Vec<PostMeta>> {
    let entries = match std::fs::read_dir(post_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Post directory({post_dir:?}) does not exist. no posts will be generated.");
            return Ok(vec![]);
        }
        Err(e) => return Err(e).with_context(|| format!("while listing {post_dir:?}")),
    };

    let mut metas = vec![];
    for entry in entries {
        let entry = entry?;
        // follows symlinks, unlike `DirEntry::file_type`
        match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!("Skipping unreadable entry {:?}: {e}", entry.path());
                continue;
            }
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping non UTF-8 file name: {:?}", entry.file_name());
            continue;
        };
        if !file_name.ends_with(POST_EXTENSION) {
            continue;
        }

        debug!("Reading {file_name}...");
        let path = entry.path();
        let html =
            std::fs::read_to_string(&path).with_context(|| format!("while reading {path:?}"))?;
        metas.push(metadata::extract(&html, &file_name));
    }

    metas.sort_by(sort_post);
    Ok(metas)
}

/// Loads a single post. `None` when no `<slug>.html` exists.
pub(crate) fn read_post(post_dir: &Path, slug: &str) -> anyhow::Result<Option<Post>> {
    let file_name = format!("{slug}{POST_EXTENSION}");
    let path = post_dir.join(&file_name);
    let html = match std::fs::read_to_string(&path) {
        Ok(html) => html,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("while reading {path:?}")),
    };

    Ok(Some(Post {
        meta: metadata::extract(&html, &file_name),
        html,
    }))
}

/// Adjacent posts of `slug` within a sorted listing.
pub(crate) fn neighbors(sorted: &[PostMeta], slug: &str) -> Neighbors {
    let Some(idx) = sorted.iter().position(|m| m.slug == slug) else {
        return Neighbors::default();
    };
    let to_neighbor = |m: &PostMeta| Neighbor {
        slug: m.slug.clone(),
        title: m.title.clone(),
    };

    Neighbors {
        prev: sorted.get(idx + 1).map(to_neighbor),
        next: idx.checked_sub(1).and_then(|i| sorted.get(i)).map(to_neighbor),
    }
}
