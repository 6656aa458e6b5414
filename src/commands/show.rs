//! Show a single post

use anyhow::Result;
use serde::Serialize;

use crate::{Adjacent, ContentStore, PostData};

#[derive(Serialize)]
struct ShowOutput {
    #[serde(flatten)]
    post: PostData,
    #[serde(flatten)]
    adjacent: Adjacent,
}

/// Print a post's HTML, or the post and its neighbours as JSON
pub async fn run(store: &ContentStore, slug: &str, json: bool) -> Result<()> {
    let post = store.get_by_slug(slug).await?;
    let adjacent = store.get_adjacent(slug).await?;

    if json {
        let output = ShowOutput { post, adjacent };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} ({})", post.meta.title, post.meta.date);
    if let Some(description) = &post.meta.description {
        println!("{}", description);
    }
    println!();
    print!("{}", post.content_html);
    println!();
    if let Some(previous) = &adjacent.previous {
        println!("← {} [{}]", previous.title, previous.slug);
    }
    if let Some(next) = &adjacent.next {
        println!("→ {} [{}]", next.title, next.slug);
    }

    Ok(())
}
