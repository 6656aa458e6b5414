//! List site content

use anyhow::Result;

use crate::{ContentStore, Paginated, PostMeta};

/// List site content by type
pub async fn run(store: &ContentStore, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = store.list_meta().await?;
            println!("Posts ({}):", posts.len());
            print_posts(&posts);
        }
        "tag" | "tags" => {
            let tags = store.tag_counts().await?;
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "slug" | "slugs" => {
            for slug in store.list_slugs().await? {
                println!("{}", slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, slug",
                content_type
            );
        }
    }

    Ok(())
}

/// Posts carrying `tag`
pub async fn tagged(store: &ContentStore, tag: &str) -> Result<()> {
    let posts = store.by_tag(tag).await?;
    println!("Posts tagged {:?} ({}):", tag, posts.len());
    print_posts(&posts);
    Ok(())
}

/// The newest `limit` posts
pub async fn latest(store: &ContentStore, limit: usize) -> Result<()> {
    let posts = store.latest(limit).await?;
    println!("Latest posts ({}):", posts.len());
    print_posts(&posts);
    Ok(())
}

/// One page of posts
pub async fn page(store: &ContentStore, page: usize, per_page: usize) -> Result<()> {
    let page = store.paginate(page, per_page).await?;
    println!("{}", page_header(&page));
    print_posts(&page.items);
    Ok(())
}

fn page_header(page: &Paginated) -> String {
    format!(
        "Page {}/{} ({} posts, {} per page):",
        page.page, page.total_pages, page.total, page.per_page
    )
}

fn print_posts(posts: &[PostMeta]) {
    for post in posts {
        println!("  {}", post_line(post));
    }
}

fn post_line(post: &PostMeta) -> String {
    let day = post.date.get(..10).unwrap_or(&post.date);
    let mut line = format!("{} - {} [{}]", day, post.title, post.slug);
    if post.draft {
        line.push_str(" (draft)");
    }
    if !post.tags().is_empty() {
        line.push_str(&format!(" #{}", post.tags().join(" #")));
    }
    line
}
