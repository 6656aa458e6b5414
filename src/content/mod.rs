//! Content module - reads post files, validates their headers, renders bodies

mod date;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod validate;

pub use date::{normalize_date, parse_date, to_iso_string};
pub use loader::{parse_post, ContentLoader};
pub use markdown::MarkdownRenderer;
pub use post::{Adjacent, Paginated, PostData, PostMeta};

pub(crate) use post::LoadedPost;
