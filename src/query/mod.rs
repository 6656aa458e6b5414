//! Query projections over a newest-first slice of post metadata
//!
//! These are pure functions; [`crate::ContentStore`] feeds them its
//! memoized collection.

mod list;
mod page;

pub use list::*;
pub use page::*;
