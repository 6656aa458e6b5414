//! Content store - memoized aggregate plus the public query API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::config::LabConfig;
use crate::content::{
    Adjacent, ContentLoader, LoadedPost, MarkdownRenderer, Paginated, PostData, PostMeta,
};
use crate::error::{ContentError, Result};
use crate::query;

/// The validated, filtered, newest-first posts of one scope
struct Collection {
    posts: Vec<LoadedPost>,
    metas: Vec<PostMeta>,
}

struct Scope {
    collection: OnceCell<Result<Arc<Collection>>>,
    loads: AtomicUsize,
}

impl Scope {
    fn new() -> Self {
        Self {
            collection: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }
}

/// Loads every post of a content directory at most once per scope and
/// answers queries from that snapshot.
///
/// Clones share the scope. The snapshot, including a failed load, lives as
/// long as the scope; use [`ContentStore::fresh_scope`] to read the
/// directory again.
#[derive(Clone)]
pub struct ContentStore {
    config: Arc<LabConfig>,
    renderer: Arc<MarkdownRenderer>,
    scope: Arc<Scope>,
}

impl ContentStore {
    /// Create a store over `config.content_dir`
    pub fn new(config: LabConfig) -> Self {
        let renderer = MarkdownRenderer::from_config(&config);
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
            scope: Arc::new(Scope::new()),
        }
    }

    /// Same configuration and renderer, nothing loaded yet
    pub fn fresh_scope(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            renderer: Arc::clone(&self.renderer),
            scope: Arc::new(Scope::new()),
        }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// The memoized aggregate. Concurrent first callers share one load.
    async fn load_all(&self) -> Result<Arc<Collection>> {
        self.scope
            .collection
            .get_or_init(|| async {
                let result = self.aggregate().await;
                if let Err(e) = &result {
                    tracing::error!("Failed to load content: {}", e);
                }
                result
            })
            .await
            .clone()
    }

    async fn aggregate(&self) -> Result<Arc<Collection>> {
        self.scope.loads.fetch_add(1, Ordering::SeqCst);

        let mut posts = ContentLoader::new(&self.config).load_all().await?;

        if self.config.mode.is_production() {
            let before = posts.len();
            posts.retain(|p| !p.meta.draft);
            tracing::debug!("Hid {} drafts", before - posts.len());
        }

        // Stable, so equal dates keep file name order
        posts.sort_by(|a, b| b.published.cmp(&a.published));

        let metas = posts.iter().map(|p| p.meta.clone()).collect();
        Ok(Arc::new(Collection { posts, metas }))
    }

    /// All post metadata, newest first
    pub async fn list_meta(&self) -> Result<Vec<PostMeta>> {
        Ok(self.load_all().await?.metas.clone())
    }

    /// A single post with its body rendered to HTML.
    ///
    /// Fails with [`ContentError::NotFound`] for unknown slugs and for
    /// drafts in production mode.
    pub async fn get_by_slug(&self, slug: &str) -> Result<PostData> {
        let collection = self.load_all().await?;
        let found = collection
            .posts
            .iter()
            .find(|p| p.meta.slug == slug)
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        if self.config.mode.is_production() && found.meta.draft {
            return Err(ContentError::NotFound(slug.to_string()));
        }

        tracing::debug!("Rendering {}", slug);
        Ok(PostData {
            meta: found.meta.clone(),
            content_html: self.renderer.render(&found.body),
        })
    }

    /// Older (`previous`) and newer (`next`) neighbours of `slug`
    pub async fn get_adjacent(&self, slug: &str) -> Result<Adjacent> {
        Ok(query::adjacent(&self.load_all().await?.metas, slug))
    }

    pub async fn list_slugs(&self) -> Result<Vec<String>> {
        Ok(query::slugs(&self.load_all().await?.metas))
    }

    /// Posts tagged exactly `tag`; empty when none are
    pub async fn by_tag(&self, tag: &str) -> Result<Vec<PostMeta>> {
        Ok(query::by_tag(&self.load_all().await?.metas, tag))
    }

    /// Distinct tags across all posts, collated
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        Ok(query::all_tags(&self.load_all().await?.metas))
    }

    /// Distinct tags with post counts, in [`ContentStore::list_tags`] order
    pub async fn tag_counts(&self) -> Result<Vec<(String, usize)>> {
        Ok(query::tag_counts(&self.load_all().await?.metas))
    }

    /// The newest `limit` posts (see [`query::DEFAULT_LATEST_LIMIT`])
    pub async fn latest(&self, limit: usize) -> Result<Vec<PostMeta>> {
        Ok(query::latest(&self.load_all().await?.metas, limit))
    }

    /// One 1-based page of posts; out of range pages clamp
    pub async fn paginate(&self, page: usize, per_page: usize) -> Result<Paginated> {
        Ok(query::paginate(&self.load_all().await?.metas, page, per_page))
    }

    #[cfg(test)]
    fn load_count(&self) -> usize {
        self.scope.loads.load(Ordering::SeqCst)
    }
}
