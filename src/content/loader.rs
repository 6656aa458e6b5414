//! Content loader - reads and validates every post in the content directory

use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use walkdir::WalkDir;

use super::frontmatter::FrontMatter;
use super::post::LoadedPost;
use super::validate::validate_frontmatter;
use super::PostMeta;
use crate::config::LabConfig;
use crate::error::{ContentError, Result};

/// Loads posts from a flat content directory
pub struct ContentLoader<'a> {
    config: &'a LabConfig,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a LabConfig) -> Self {
        Self { config }
    }

    /// Post files directly inside the content directory as `(slug, path)`,
    /// sorted by file name
    pub fn list_post_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let dir = &self.config.content_dir;
        let metadata = std::fs::metadata(dir).map_err(|e| ContentError::io(dir, e))?;
        if !metadata.is_dir() {
            return Err(ContentError::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir.as_path()).to_path_buf();
                ContentError::io(path, e.into())
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.config.is_post_file(path) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(slug) => files.push((slug.to_string(), path.to_path_buf())),
                None => tracing::warn!("Skipping post with non UTF-8 name: {:?}", path),
            }
        }

        Ok(files)
    }

    /// Read, split and validate every post.
    ///
    /// Files are read concurrently; the result keeps file name order. The
    /// first failing file (in that order) aborts the whole load.
    pub(crate) async fn load_all(&self) -> Result<Vec<LoadedPost>> {
        let start = std::time::Instant::now();
        let files = self.list_post_files()?;
        if files.is_empty() {
            tracing::warn!("No posts found in {:?}", self.config.content_dir);
        }

        let mut tasks = JoinSet::new();
        for (index, (slug, path)) in files.into_iter().enumerate() {
            tasks.spawn(async move { (index, load_post(slug, path).await) });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined.map_err(|e| ContentError::Join(e.to_string()))?);
        }
        results.sort_by_key(|(index, _)| *index);

        let posts = results
            .into_iter()
            .map(|(_, post)| post)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "Loaded {} posts from {:?} in {:.2}ms",
            posts.len(),
            self.config.content_dir,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(posts)
    }
}

/// Load a single post from a file
async fn load_post(slug: String, path: PathBuf) -> Result<LoadedPost> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ContentError::io(&path, e))?;
    tracing::debug!("Read {} ({} bytes)", display_name(&path), raw.len());
    parse_loaded(&raw, &slug)
}

pub(crate) fn parse_loaded(raw: &str, slug: &str) -> Result<LoadedPost> {
    let (header, body) = FrontMatter::parse(raw)
        .map_err(|e| ContentError::validation(slug, format!("malformed frontmatter: {}", e)))?;
    let (meta, published) = validate_frontmatter(&header, slug)?;
    Ok(LoadedPost {
        meta,
        body: body.to_string(),
        published,
    })
}

/// Split and validate the text of one post file named `slug`.
///
/// Returns the metadata and the raw markdown body.
pub fn parse_post(raw: &str, slug: &str) -> Result<(PostMeta, String)> {
    parse_loaded(raw, slug).map(|post| (post.meta, post.body))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: \"{date}\"\n---\nBody of {title}\n")
    }

    #[test]
    fn test_parse_post() {
        let (meta, body) = parse_post(&post("Hello", "2024-01-01"), "hello").unwrap();
        assert_eq!(meta.slug, "hello");
        assert_eq!(meta.title, "Hello");
        assert_eq!(body, "Body of Hello\n");
    }

    #[test]
    fn test_parse_post_malformed_yaml() {
        let err = parse_post("---\ntitle: [oops\n---\n", "broken").unwrap_err();
        match err {
            ContentError::Validation { slug, reason } => {
                assert_eq!(slug, "broken");
                assert!(reason.starts_with("malformed frontmatter"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_list_post_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", &post("B", "2024-01-01"));
        write(dir.path(), "a.md", &post("A", "2024-01-01"));
        write(dir.path(), "notes.txt", "not a post");
        fs::create_dir(dir.path().join("nested.md")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write(&dir.path().join("sub"), "c.md", &post("C", "2024-01-01"));

        let config = LabConfig::for_dir(dir.path());
        let files = ContentLoader::new(&config).list_post_files().unwrap();
        let slugs: Vec<_> = files.iter().map(|(slug, _)| slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LabConfig::for_dir(dir.path().join("absent"));
        let err = ContentLoader::new(&config).list_post_files().unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_all_keeps_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for (name, date) in [("c", "2024-03-01"), ("a", "2024-01-01"), ("b", "2024-06-01")] {
            write(dir.path(), &format!("{name}.md"), &post(name, date));
        }

        let config = LabConfig::for_dir(dir.path());
        let posts = ContentLoader::new(&config).load_all().await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.meta.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
        assert_eq!(posts[1].body, "Body of b\n");
    }

    #[tokio::test]
    async fn test_load_all_reports_first_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a-good.md", &post("Good", "2024-01-01"));
        write(dir.path(), "b-bad.md", "---\ntitle: \"\"\ndate: \"2024-01-01\"\n---\n");
        write(dir.path(), "c-bad.md", "no frontmatter at all");

        let config = LabConfig::for_dir(dir.path());
        let err = ContentLoader::new(&config).load_all().await.unwrap_err();
        match err {
            ContentError::Validation { slug, .. } => assert_eq!(slug, "b-bad"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
