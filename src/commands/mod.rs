//! CLI commands over a [`crate::ContentStore`]

pub mod list;
pub mod new;
pub mod show;
