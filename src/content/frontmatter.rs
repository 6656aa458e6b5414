//! Front-matter splitting
//!
//! A post starts with a YAML block fenced by `---` lines. The block is parsed
//! into an untyped [`serde_yaml::Value`] which only the validator looks at.

use serde_yaml::{Mapping, Value};

/// Header extracted from the top of a content file
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FrontMatter {
    /// No `---` fenced block at the start of the file
    Missing,
    /// Whatever YAML the block contained; not necessarily a mapping
    Parsed(Value),
}

impl FrontMatter {
    /// Split `content` into its header and the markdown body that follows.
    ///
    /// A file without an opening fence, or with an opening fence that is
    /// never closed, has no header and its whole text is the body.
    pub(crate) fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some((first, rest)) = split_line(content) else {
            return Ok((FrontMatter::Missing, content));
        };
        if !is_opening_fence(first) {
            return Ok((FrontMatter::Missing, content));
        }

        let mut yaml_len = 0;
        let mut remaining = rest;
        while let Some((line, after)) = split_line(remaining) {
            if line.trim_end() == "---" {
                let yaml = &rest[..yaml_len];
                let value = if yaml.trim().is_empty() {
                    Value::Mapping(Mapping::new())
                } else {
                    serde_yaml::from_str::<Value>(yaml)?
                };
                return Ok((FrontMatter::Parsed(value), after));
            }
            yaml_len += remaining.len() - after.len();
            remaining = after;
        }

        // Unterminated block
        Ok((FrontMatter::Missing, content))
    }
}

/// `---`, optionally tagged with the header language
fn is_opening_fence(line: &str) -> bool {
    match line.trim_end().strip_prefix("---") {
        Some(lang) => matches!(lang.trim(), "" | "yaml" | "yml"),
        None => false,
    }
}

/// Split off the first line, dropping its `\n` or `\r\n` terminator
fn split_line(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    match s.find('\n') {
        Some(pos) => Some((s[..pos].trim_end_matches('\r'), &s[pos + 1..])),
        None => Some((s, "")),
    }
}
