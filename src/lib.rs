//! mdlab: markdown content loader for lab notes
//!
//! Reads a flat directory of markdown posts with YAML front-matter,
//! validates the headers, and answers list, lookup, navigation, tag and
//! pagination queries from a per-scope memoized snapshot. Bodies are
//! rendered to HTML (GFM) only when a single post is requested.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod query;
pub mod store;

pub use config::{LabConfig, Mode};
pub use content::{Adjacent, Paginated, PostData, PostMeta};
pub use error::{ContentError, Result};
pub use store::ContentStore;

use std::path::{Path, PathBuf};

/// A lab site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Lab {
    /// Configuration with `content_dir` resolved against `base_dir`
    pub config: LabConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Lab {
    /// Open the site in `base_dir`, reading `mdlab.yml` when present.
    ///
    /// `mode` overrides the configured execution mode.
    pub fn new<P: AsRef<Path>>(base_dir: P, mode: Option<Mode>) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut config = LabConfig::load_or_default(&base_dir)?;
        config.resolve_content_dir(&base_dir);
        if let Some(mode) = mode {
            config.mode = mode;
        }

        Ok(Self { config, base_dir })
    }

    /// A content store with a fresh scope
    pub fn store(&self) -> ContentStore {
        ContentStore::new(self.config.clone())
    }

    /// Scaffold a new post
    pub fn new_post(&self, title: &str, draft: bool) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title, draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lab_reads_config_and_overrides_mode() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(config::CONFIG_FILE),
            "content_dir: posts\nmode: production\n",
        )
        .unwrap();

        let lab = Lab::new(dir.path(), None).unwrap();
        assert_eq!(lab.config.content_dir, dir.path().join("posts"));
        assert!(lab.config.mode.is_production());

        let dev = Lab::new(dir.path(), Some(Mode::Development)).unwrap();
        assert_eq!(dev.config.mode, Mode::Development);
    }

    #[test]
    fn test_lab_rejects_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(config::CONFIG_FILE), "per_page: [not, a, number]\n").unwrap();
        assert!(Lab::new(dir.path(), None).is_err());
    }
}
