//! The static content corpus: part bodies keyed by location plus the
//! chapter listing they are described by.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    content::{ChapterEntry, ChapterListing, PartKey},
    error::{CoreError, Result},
    frontmatter::PartFrontmatter,
};

/// A part document as supplied by a content loader.
#[derive(Debug, Clone, Default)]
pub struct CorpusDocument {
    /// Corpus key, e.g. `ch2p3`.
    pub key: String,

    /// Markdown body without frontmatter.
    pub body: String,

    /// Per-part metadata.
    pub frontmatter: PartFrontmatter,
}

impl CorpusDocument {
    /// Create a document without frontmatter.
    pub fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            frontmatter: PartFrontmatter::default(),
        }
    }
}

/// Read-only registry of every part in the book.
///
/// Construction validates that corpus keys are well formed and that the
/// documents and the listing describe exactly the same set of parts, so
/// lookups by listing position can never miss afterwards.
#[derive(Debug, Clone)]
pub struct ContentCorpus {
    listing: ChapterListing,
    entries: BTreeMap<PartKey, ChapterEntry>,
    frontmatter: BTreeMap<PartKey, PartFrontmatter>,
}

impl ContentCorpus {
    /// Build a corpus from `(key, body)` pairs.
    pub fn new<K, B>(
        listing: ChapterListing,
        documents: impl IntoIterator<Item = (K, B)>,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        B: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(key, body)| CorpusDocument::new(key.as_ref(), body));
        Self::from_documents(listing, documents)
    }

    /// Build a corpus from loader documents.
    pub fn from_documents(
        listing: ChapterListing,
        documents: impl IntoIterator<Item = CorpusDocument>,
    ) -> Result<Self> {
        for (idx, chapter) in listing.chapters.iter().enumerate() {
            if chapter.parts.is_empty() {
                return Err(CoreError::integrity(format!(
                    "chapter {} ('{}') has no parts",
                    idx + 1,
                    chapter.title
                )));
            }
        }

        let mut entries = BTreeMap::new();
        let mut frontmatter = BTreeMap::new();

        for doc in documents {
            let key = PartKey::parse_corpus_key(&doc.key)?;

            let part = listing.part(key).ok_or_else(|| {
                CoreError::integrity(format!("document '{}' has no listing entry", doc.key))
            })?;

            if entries.contains_key(&key) {
                return Err(CoreError::integrity(format!(
                    "duplicate document for '{}'",
                    key.corpus_key()
                )));
            }

            entries.insert(
                key,
                ChapterEntry {
                    key,
                    title: part.title.clone(),
                    sections: part.sections.clone(),
                    body: doc.body,
                },
            );
            frontmatter.insert(key, doc.frontmatter);
        }

        if let Some(missing) = listing.keys().find(|key| !entries.contains_key(key)) {
            return Err(CoreError::integrity(format!(
                "listing part '{}' has no document",
                missing.corpus_key()
            )));
        }

        debug!(
            chapters = listing.len(),
            parts = entries.len(),
            "Validated content corpus"
        );

        Ok(Self {
            listing,
            entries,
            frontmatter,
        })
    }

    /// Body text of a part.
    pub fn get_body(&self, chapter: u32, part: u32) -> Result<&str> {
        PartKey::new(chapter, part)
            .and_then(|key| self.entries.get(&key))
            .map(|entry| entry.body.as_str())
            .ok_or_else(|| CoreError::not_found(chapter, part))
    }

    /// Entry at a location.
    pub fn entry(&self, key: PartKey) -> Result<&ChapterEntry> {
        self.entries
            .get(&key)
            .ok_or_else(|| CoreError::not_found(key.chapter, key.part))
    }

    /// Per-part metadata at a location.
    pub fn frontmatter(&self, key: PartKey) -> Result<&PartFrontmatter> {
        self.frontmatter
            .get(&key)
            .ok_or_else(|| CoreError::not_found(key.chapter, key.part))
    }

    /// The chapter listing.
    pub fn listing(&self) -> &ChapterListing {
        &self.listing
    }

    /// Entries in chapter, then part, ascending order.
    pub fn entries(&self) -> impl Iterator<Item = &ChapterEntry> {
        self.entries.values()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus has no parts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First part of the first chapter.
    pub fn first_key(&self) -> Option<PartKey> {
        self.entries.keys().next().copied()
    }

    /// Last part of the last chapter.
    pub fn last_key(&self) -> Option<PartKey> {
        self.entries.keys().next_back().copied()
    }
}
