//! Content types: part keys, chapter entries and the chapter listing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Chapter/part location of one addressable unit of content.
///
/// Both numbers are 1-based. Ordering is chapter first, then part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartKey {
    /// Chapter number, starting at 1.
    pub chapter: u32,
    /// Part number within the chapter, starting at 1.
    pub part: u32,
}

impl PartKey {
    /// Create a key. Returns `None` if either number is zero.
    pub fn new(chapter: u32, part: u32) -> Option<Self> {
        (chapter >= 1 && part >= 1).then_some(Self { chapter, part })
    }

    /// Parse a corpus key of the form `ch{N}p{M}`.
    ///
    /// The `p` is treated as a delimiter, so multi-digit numbers such as
    /// `ch12p10` parse correctly.
    pub fn parse_corpus_key(key: &str) -> Result<Self> {
        let invalid = || CoreError::integrity(format!("malformed corpus key '{key}'"));

        let rest = key
            .trim()
            .to_ascii_lowercase()
            .strip_prefix("ch")
            .map(str::to_string)
            .ok_or_else(invalid)?;
        let (chapter, part) = rest.split_once('p').ok_or_else(invalid)?;

        let chapter = parse_number(chapter).ok_or_else(invalid)?;
        let part = parse_number(part).ok_or_else(invalid)?;
        Self::new(chapter, part).ok_or_else(invalid)
    }

    /// Corpus key text, e.g. `ch3p2`.
    pub fn corpus_key(&self) -> String {
        format!("ch{}p{}", self.chapter, self.part)
    }

    /// Deep link for this part, e.g. `/book/ch3/p2`.
    pub fn url_path(&self) -> String {
        format!("/book/ch{}/p{}", self.chapter, self.part)
    }

    /// Zero-based chapter index into the listing. `None` for chapter 0.
    pub fn chapter_index(&self) -> Option<usize> {
        (self.chapter as usize).checked_sub(1)
    }

    /// Zero-based part index within the chapter. `None` for part 0.
    pub fn part_index(&self) -> Option<usize> {
        (self.part as usize).checked_sub(1)
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ch{}-P{}", self.chapter, self.part)
    }
}

impl FromStr for PartKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_corpus_key(s)
    }
}

/// Parse an unsigned decimal made only of ASCII digits.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One addressable unit of content: a part of a chapter with its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// Location of the part.
    pub key: PartKey,

    /// Part title.
    pub title: String,

    /// Section headings within the part.
    #[serde(default)]
    pub sections: Vec<String>,

    /// Full markdown body.
    pub body: String,
}

impl ChapterEntry {
    /// Chapter number (1-based).
    pub fn chapter_number(&self) -> u32 {
        self.key.chapter
    }

    /// Part number (1-based).
    pub fn part_number(&self) -> u32 {
        self.key.part
    }
}

/// A part as it appears in the listing (no body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part title.
    pub title: String,

    /// Section headings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

/// A chapter and its ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter title.
    pub title: String,

    /// Short description shown in the table of contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Ordered chapters, each owning ordered parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterListing {
    /// Chapters in reading order.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl ChapterListing {
    /// Create a listing from chapters.
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// Parse a listing from TOML (`[[chapters]]` / `[[chapters.parts]]`).
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Chapter at a 1-based chapter number.
    pub fn chapter(&self, chapter: u32) -> Option<&Chapter> {
        chapter
            .checked_sub(1)
            .and_then(|idx| self.chapters.get(idx as usize))
    }

    /// Part at a location.
    pub fn part(&self, key: PartKey) -> Option<&Part> {
        self.chapter(key.chapter)
            .zip(key.part_index())
            .and_then(|(chapter, idx)| chapter.parts.get(idx))
    }

    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the listing has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Every part location in reading order.
    pub fn keys(&self) -> impl Iterator<Item = PartKey> + '_ {
        self.chapters.iter().enumerate().flat_map(|(ci, chapter)| {
            (0..chapter.parts.len()).map(move |pi| PartKey {
                chapter: ci as u32 + 1,
                part: pi as u32 + 1,
            })
        })
    }

    /// Chapters whose title, part titles or section headings contain the
    /// query, case-insensitively, paired with their zero-based index. An
    /// empty query keeps every chapter.
    pub fn filter(&self, query: &str) -> Vec<(usize, &Chapter)> {
        let query = query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);

        self.chapters
            .iter()
            .enumerate()
            .filter(|(_, chapter)| {
                contains(&chapter.title)
                    || chapter.parts.iter().any(|part| {
                        contains(&part.title) || part.sections.iter().any(|s| contains(s))
                    })
            })
            .collect()
    }
}
