//! Front-matter validation into [`PostMeta`]

use chrono::{DateTime, Utc};
use serde_yaml::Value;

use super::date::{parse_date, to_iso_string};
use super::frontmatter::FrontMatter;
use super::PostMeta;
use crate::error::{ContentError, Result};

/// Validate and normalize a header read from the file that yields `slug`.
///
/// Returns the metadata together with the parsed publication instant.
///
/// `serde_yaml` reads an unquoted `date: 2024-01-15` as a plain string, so it
/// is accepted here like a quoted one. YAML loaders that resolve timestamps
/// produce a date object for it instead, which a string-only check rejects.
/// Numbers (`date: 2024`) are still rejected.
pub(crate) fn validate_frontmatter(
    header: &FrontMatter,
    slug: &str,
) -> Result<(PostMeta, DateTime<Utc>)> {
    let map = match header {
        FrontMatter::Parsed(Value::Mapping(map)) => map,
        _ => return Err(ContentError::validation(slug, "missing frontmatter")),
    };

    let title = match map.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => title.trim().to_string(),
        _ => return Err(ContentError::validation(slug, "missing/invalid \"title\"")),
    };

    let published = match map.get("date") {
        Some(Value::String(date)) => parse_date(date),
        _ => None,
    }
    .ok_or_else(|| ContentError::validation(slug, "missing/invalid \"date\""))?;

    let description = match map.get("description") {
        Some(Value::String(description)) => Some(description.trim().to_string()),
        _ => None,
    };

    let draft = matches!(map.get("draft"), Some(Value::Bool(true)));

    let tags = match map.get("tags") {
        Some(Value::Sequence(items)) => {
            let tags: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            (!tags.is_empty()).then_some(tags)
        }
        _ => None,
    };

    let meta = PostMeta {
        slug: slug.to_string(),
        title,
        date: to_iso_string(&published),
        description,
        draft,
        tags,
    };

    Ok((meta, published))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(yaml: &str) -> Result<PostMeta> {
        let raw = format!("---\n{yaml}\n---\nbody");
        let (header, _) = FrontMatter::parse(&raw).unwrap();
        validate_frontmatter(&header, "sample").map(|(meta, _)| meta)
    }

    fn reason(err: ContentError) -> String {
        match err {
            ContentError::Validation { slug, reason } => {
                assert_eq!(slug, "sample");
                reason
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_frontmatter_is_normalized() {
        let meta = validate(
            r#"title: "  Hello  "
date: "2024-03-01"
description: "  A short one.  "
draft: true
tags: ["a", "", "  ", "b"]"#,
        )
        .unwrap();

        assert_eq!(meta.slug, "sample");
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.date, "2024-03-01T00:00:00.000Z");
        assert_eq!(meta.description.as_deref(), Some("A short one."));
        assert!(meta.draft);
        assert_eq!(meta.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_unquoted_yaml_date_is_accepted() {
        let meta = validate("title: Plain\ndate: 2024-01-15 10:30:00").unwrap();
        assert_eq!(meta.date, "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_missing_header() {
        let err = validate_frontmatter(&FrontMatter::Missing, "sample").unwrap_err();
        assert_eq!(reason(err), "missing frontmatter");
    }

    #[test]
    fn test_non_mapping_header() {
        let header = FrontMatter::Parsed(Value::Sequence(vec![Value::from("title")]));
        let err = validate_frontmatter(&header, "sample").unwrap_err();
        assert_eq!(reason(err), "missing frontmatter");
    }

    #[test]
    fn test_blank_title_fails() {
        let err = validate("title: \"   \"\ndate: \"2024-01-01\"").unwrap_err();
        assert_eq!(reason(err), "missing/invalid \"title\"");
    }

    #[test]
    fn test_non_string_title_fails() {
        let err = validate("title: 42\ndate: \"2024-01-01\"").unwrap_err();
        assert_eq!(reason(err), "missing/invalid \"title\"");
    }

    #[test]
    fn test_missing_or_invalid_date_fails() {
        for yaml in [
            "title: T",
            "title: T\ndate: 2024",
            "title: T\ndate: \"someday\"",
        ] {
            let err = validate(yaml).unwrap_err();
            assert_eq!(reason(err), "missing/invalid \"date\"", "yaml: {yaml}");
        }
    }

    #[test]
    fn test_draft_only_true_for_boolean_true() {
        let base = "title: T\ndate: \"2024-01-01\"";
        assert!(!validate(base).unwrap().draft);
        assert!(!validate(&format!("{base}\ndraft: false")).unwrap().draft);
        assert!(!validate(&format!("{base}\ndraft: \"true\"")).unwrap().draft);
        assert!(!validate(&format!("{base}\ndraft: 1")).unwrap().draft);
        assert!(validate(&format!("{base}\ndraft: true")).unwrap().draft);
    }

    #[test]
    fn test_tags_normalization() {
        let base = "title: T\ndate: \"2024-01-01\"";
        let blank = validate(&format!("{base}\ntags: [\"\", \"  \"]")).unwrap();
        assert_eq!(blank.tags, None);

        let mixed = validate(&format!("{base}\ntags: [\" rust \", 7, true, notes]")).unwrap();
        assert_eq!(
            mixed.tags,
            Some(vec!["rust".to_string(), "notes".to_string()])
        );

        let scalar = validate(&format!("{base}\ntags: rust")).unwrap();
        assert_eq!(scalar.tags, None);
    }

    #[test]
    fn test_non_string_description_is_dropped() {
        let meta = validate("title: T\ndate: \"2024-01-01\"\ndescription: [x]").unwrap();
        assert_eq!(meta.description, None);
    }
}
