//! Sitemap generation.
//!
//! Lists the home page, the table of contents and every part of the book
//! as a sitemaps.org `urlset`.

use std::io::Write;

use ng4eb_core::{Config, ContentCorpus};
use thiserror::Error;
use tracing::debug;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    /// Absolute URL.
    pub loc: String,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap of the book.
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    urls: Vec<SitemapUrl>,
}

impl Sitemap {
    /// Home page, table of contents, then every part in reading order.
    pub fn from_corpus(config: &Config, corpus: &ContentCorpus) -> Self {
        let mut urls = vec![
            SitemapUrl {
                loc: config.url_for("/"),
                changefreq: ChangeFreq::Daily,
                priority: 1.0,
            },
            SitemapUrl {
                loc: config.url_for("/toc"),
                changefreq: ChangeFreq::Weekly,
                priority: 0.8,
            },
        ];

        urls.extend(corpus.entries().map(|entry| SitemapUrl {
            loc: config.url_for(&entry.key.url_path()),
            changefreq: ChangeFreq::Monthly,
            priority: 0.5,
        }));

        debug!(count = urls.len(), "generating sitemap");
        Self { urls }
    }

    /// Entries in output order.
    pub fn urls(&self) -> &[SitemapUrl] {
        &self.urls
    }

    /// Render the sitemap XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                url.changefreq.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write the sitemap XML to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_xml().as_bytes())?;
        Ok(())
    }
}

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use ng4eb_core::{
        Chapter, ChapterListing, Part,
        config::{ContentConfig, SearchConfig, SiteConfig},
    };

    use super::*;

    fn config(base_url: &str) -> Config {
        Config {
            site: SiteConfig {
                title: "ng4eb".to_string(),
                base_url: base_url.to_string(),
                description: None,
            },
            content: ContentConfig::default(),
            search: SearchConfig::default(),
            root: Default::default(),
        }
    }

    fn corpus() -> ContentCorpus {
        let part = |title: &str| Part {
            title: title.to_string(),
            sections: vec![],
        };
        let listing = ChapterListing::new(vec![
            Chapter {
                title: "Intro".to_string(),
                description: None,
                parts: vec![part("What"), part("Why")],
            },
            Chapter {
                title: "CLI".to_string(),
                description: None,
                parts: vec![part("Install")],
            },
        ]);
        ContentCorpus::new(
            listing,
            [("ch1p1", "# What"), ("ch1p2", "# Why"), ("ch2p1", "# Install")],
        )
        .unwrap()
    }

    #[test]
    fn test_sitemap_urls() {
        let sitemap = Sitemap::from_corpus(&config("https://www.ng4eb.com"), &corpus());
        let locs: Vec<&str> = sitemap.urls().iter().map(|u| u.loc.as_str()).collect();

        assert_eq!(
            locs,
            vec![
                "https://www.ng4eb.com/",
                "https://www.ng4eb.com/toc",
                "https://www.ng4eb.com/book/ch1/p1",
                "https://www.ng4eb.com/book/ch1/p2",
                "https://www.ng4eb.com/book/ch2/p1",
            ]
        );
    }

    #[test]
    fn test_sitemap_xml() {
        let sitemap = Sitemap::from_corpus(&config("https://www.ng4eb.com"), &corpus());
        let xml = sitemap.to_xml();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://www.ng4eb.com/book/ch2/p1</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_sitemap_escapes_loc() {
        let sitemap = Sitemap::from_corpus(&config("https://example.com/?a=1&b=2"), &corpus());
        assert!(sitemap.to_xml().contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_write_to() {
        let sitemap = Sitemap::from_corpus(&config("https://www.ng4eb.com"), &corpus());
        let mut buf = Vec::new();
        sitemap.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), sitemap.to_xml());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
