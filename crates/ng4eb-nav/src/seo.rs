//! Page title and meta tags for a part.

use ng4eb_core::{Config, PartFrontmatter, PartKey};
use serde::Serialize;

use crate::sitemap::escape_xml;

/// A `<meta name=... content=...>` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: &'static str,
    pub content: String,
}

/// SEO metadata of one part page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    /// Document title, suffixed with the site title.
    pub title: String,

    /// Page description. Falls back to the site description.
    pub description: String,

    /// Meta keywords.
    pub keywords: Vec<String>,

    /// Absolute canonical URL.
    pub url: String,
}

impl SeoMeta {
    /// Build metadata for the part at `key`.
    ///
    /// The frontmatter title, when present, replaces the default
    /// `Ch{N}-P{M} - {part title}`.
    pub fn for_part(
        config: &Config,
        key: PartKey,
        part_title: &str,
        frontmatter: &PartFrontmatter,
    ) -> Self {
        let page_title = frontmatter
            .title
            .clone()
            .unwrap_or_else(|| format!("{key} - {part_title}"));

        let description = frontmatter
            .description
            .clone()
            .or_else(|| config.site.description.clone())
            .unwrap_or_default();

        Self {
            title: format!("{page_title} - {}", config.site.title),
            description,
            keywords: frontmatter.keywords.clone(),
            url: config.url_for(&key.url_path()),
        }
    }

    /// Meta tags in document order.
    pub fn tags(&self) -> Vec<MetaTag> {
        let tag = |name, content: &str| MetaTag {
            name,
            content: content.to_string(),
        };

        let mut tags = vec![
            tag("description", &self.description),
            tag("url", &self.url),
            tag("og:title", &self.title),
            tag("og:description", &self.description),
            tag("og:url", &self.url),
            tag("twitter:title", &self.title),
            tag("twitter:description", &self.description),
            tag("twitter:url", &self.url),
            tag("twitter:card", "summary"),
        ];
        if !self.keywords.is_empty() {
            tags.push(tag("keywords", &self.keywords.join(", ")));
        }
        tags
    }

    /// `<title>` and `<meta>` elements for a page head.
    pub fn to_html(&self) -> String {
        let mut html = format!("<title>{}</title>\n", escape_xml(&self.title));
        for tag in self.tags() {
            html.push_str(&format!(
                "<meta name=\"{}\" content=\"{}\">\n",
                tag.name,
                escape_xml(&tag.content)
            ));
        }
        html
    }
}
