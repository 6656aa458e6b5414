//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Lab;

/// Header written into a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    draft: bool,
    tags: Vec<String>,
}

/// Create `<content_dir>/<slug>.md` with a valid header and return its path
pub fn create_post(lab: &Lab, title: &str, draft: bool) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("A post needs a non-empty title");
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = &lab.config.content_dir;
    fs::create_dir_all(target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let extension = lab
        .config
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("md");
    let file_path = target_dir.join(format!("{}.{}", slug, extension));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let header = serde_yaml::to_string(&Scaffold {
        title,
        date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        draft,
        tags: Vec::new(),
    })?;
    let content = format!("---\n{}---\n\n", header);

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_post;
    use crate::LabConfig;

    fn lab(dir: &std::path::Path) -> Lab {
        Lab {
            config: LabConfig::for_dir(dir.join("content")),
            base_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_created_post_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let lab = lab(dir.path());

        let path = create_post(&lab, "Hello: World!", true).unwrap();
        assert_eq!(path.file_name().unwrap(), "hello-world.md");

        let raw = fs::read_to_string(&path).unwrap();
        let (meta, body) = parse_post(&raw, "hello-world").unwrap();
        assert_eq!(meta.title, "Hello: World!");
        assert!(meta.draft);
        assert_eq!(meta.tags, None);
        assert_eq!(body.trim(), "");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let lab = lab(dir.path());
        create_post(&lab, "Twice", false).unwrap();
        assert!(create_post(&lab, "Twice", false).is_err());
    }

    #[test]
    fn test_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_post(&lab(dir.path()), "   ", false).is_err());
    }
}
