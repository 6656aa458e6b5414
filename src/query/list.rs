//! List projections: slugs, tag filtering, distinct tags, latest posts

use std::collections::HashMap;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

use crate::content::PostMeta;

/// Default number of posts returned by [`latest`]
pub const DEFAULT_LATEST_LIMIT: usize = 3;

/// Slugs in collection order
pub fn slugs(posts: &[PostMeta]) -> Vec<String> {
    posts.iter().map(|p| p.slug.clone()).collect()
}

/// Posts carrying exactly `tag`, in collection order
pub fn by_tag(posts: &[PostMeta], tag: &str) -> Vec<PostMeta> {
    posts.iter().filter(|p| p.has_tag(tag)).cloned().collect()
}

/// Every distinct tag, in root-locale collation order
pub fn all_tags(posts: &[PostMeta]) -> Vec<String> {
    tag_counts(posts).into_iter().map(|(tag, _)| tag).collect()
}

/// Distinct tags with the number of posts carrying each, collated like
/// [`all_tags`]
pub fn tag_counts(posts: &[PostMeta]) -> Vec<(String, usize)> {
    let mut tags: HashMap<&str, usize> = HashMap::new();

    for post in posts {
        for tag in post.tags() {
            *tags.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<_> = tags
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    collate_by(&mut sorted, |(tag, _)| tag.as_str());
    sorted
}

/// The first `limit` posts
pub fn latest(posts: &[PostMeta], limit: usize) -> Vec<PostMeta> {
    posts.iter().take(limit).cloned().collect()
}

/// Sort by `key` with the ICU root collator.
///
/// Punctuation sorts before digits and digits before letters, accents are
/// secondary and lowercase comes before uppercase on otherwise equal keys.
/// Keys the collator considers equal fall back to code point order.
pub fn collate_by<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => {
            items.sort_by(|a, b| {
                let (a, b) = (key(a), key(b));
                collator.compare(a, b).then_with(|| a.cmp(b))
            });
        }
        Err(e) => {
            warn!("Root collator unavailable, sorting by code point: {}", e);
            items.sort_by(|a, b| key(a).cmp(key(b)));
        }
    }
}
