//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and display metadata of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// File name without extension
    pub slug: String,

    /// Trimmed, never empty
    pub title: String,

    /// ISO 8601 UTC timestamp with millisecond precision
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// `None` rather than an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PostMeta {
    /// Whether the post carries exactly `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// Tags as a slice, empty when absent
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A post with its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(flatten)]
    pub meta: PostMeta,

    pub content_html: String,
}

/// Older and newer neighbours of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacent {
    /// Chronologically older
    pub previous: Option<PostMeta>,
    /// Chronologically newer
    pub next: Option<PostMeta>,
}

/// One page of post metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated {
    /// 1-based page actually served, after clamping
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<PostMeta>,
}

/// A validated post as held by the aggregate
#[derive(Debug, Clone)]
pub(crate) struct LoadedPost {
    pub meta: PostMeta,
    /// Raw markdown after the header
    pub body: String,
    /// Parsed form of `meta.date`, used for ordering
    pub published: DateTime<Utc>,
}
