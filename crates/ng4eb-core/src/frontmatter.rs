//! Frontmatter parsing for part files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Per-part metadata used for page titles and meta tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartFrontmatter {
    /// Title override for the page `<title>`.
    #[serde(default)]
    pub title: Option<String>,

    /// Page description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Meta keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a part file, returning it with the remaining body.
///
/// Files without frontmatter get the default metadata and their full text
/// as the body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(PartFrontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((PartFrontmatter::default(), content.to_string()));
    };

    let frontmatter: PartFrontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = r#"---
description: "Basics of routing"
keywords: [routing, router]
---

# Using Routing
"#;
        let (fm, body) = parse_frontmatter(content, Path::new("ch4p1.md")).unwrap();
        assert_eq!(fm.description.as_deref(), Some("Basics of routing"));
        assert_eq!(fm.keywords, vec!["routing", "router"]);
        assert!(fm.title.is_none());
        assert!(body.starts_with("# Using Routing"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = r#"+++
title = "Ch4-P1 - Using Routing"
+++
Body text"#;
        let (fm, body) = parse_frontmatter(content, Path::new("ch4p1.md")).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Ch4-P1 - Using Routing"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Plain\n\nNo metadata here.";
        let (fm, body) = parse_frontmatter(content, Path::new("ch1p1.md")).unwrap();
        assert_eq!(fm, PartFrontmatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_invalid_frontmatter() {
        let content = "---\nkeywords: [unclosed\n---\nbody";
        let err = parse_frontmatter(content, Path::new("ch1p1.md")).unwrap_err();
        assert!(err.to_string().contains("Frontmatter error in ch1p1.md"));
    }
}
