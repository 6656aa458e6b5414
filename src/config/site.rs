//! Lab configuration (mdlab.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted by the CLI to pick the execution mode
pub const MODE_ENV_VAR: &str = "MDLAB_ENV";

/// Execution mode, controls draft visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    /// Interpret an environment value; only `production` selects production
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    /// Read the mode from `MDLAB_ENV`, if it is set
    pub fn from_env() -> Option<Self> {
        std::env::var(MODE_ENV_VAR)
            .ok()
            .map(|v| Self::from_env_value(&v))
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Directory holding the markdown posts, relative to the base directory
    pub content_dir: PathBuf,
    pub mode: Mode,
    /// File extensions treated as posts (without the dot)
    pub extensions: Vec<String>,

    // Listing defaults
    pub per_page: usize,
    pub latest_limit: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/lab"),
            mode: Mode::Development,
            extensions: vec!["md".to_string()],
            per_page: 10,
            latest_limit: crate::query::DEFAULT_LATEST_LIMIT,
            highlight: HighlightConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl LabConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: LabConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `mdlab.yml` from `base_dir`, or defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(super::CONFIG_FILE);
        if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Defaults pointed at an explicit content directory
    pub fn for_dir<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Make a relative `content_dir` absolute against `base_dir`
    pub fn resolve_content_dir<P: AsRef<Path>>(&mut self, base_dir: P) {
        if self.content_dir.is_relative() {
            self.content_dir = base_dir.as_ref().join(&self.content_dir);
        }
    }

    /// Whether `path` carries one of the configured post extensions
    pub fn is_post_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a syntect default theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pass raw HTML in post bodies through instead of dropping it
    pub allow_html: bool,
}
