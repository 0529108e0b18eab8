//! Previous/next navigation between parts.

use std::sync::LazyLock;

use ng4eb_core::{ChapterListing, ContentCorpus, CoreError, Part, PartKey, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/?(?:book/)?ch(\d+)/p(\d+)/?$").expect("Invalid location pattern regex")
});

/// A link to an adjacent part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    /// `Ch{N} - P{M} - {part title}`, empty for the empty link.
    pub title: String,

    /// `/book/ch{N}/p{M}`, empty for the empty link.
    pub path: String,

    /// Zero-based index of the target chapter when the link crosses a
    /// chapter boundary.
    pub chapter_index: Option<usize>,
}

impl NavigationLink {
    /// The link shown when there is nothing before or after.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the empty link.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    fn to_part(key: PartKey, part: &Part, chapter_index: Option<usize>) -> Self {
        Self {
            title: format!("Ch{} - P{} - {}", key.chapter, key.part, part.title),
            path: key.url_path(),
            chapter_index,
        }
    }
}

/// Navigation for the current part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// `Ch{N}-P{M} - {part title}`.
    pub title: String,
    pub prev: NavigationLink,
    pub next: NavigationLink,
}

/// Parse a book path into a location.
///
/// Accepts `ch{N}/p{M}` with an optional leading `/book` and slash. Any
/// `#fragment` or `?query` is ignored.
pub fn parse_location(path: &str) -> Result<PartKey> {
    let invalid = || CoreError::invalid_path(path);

    let trimmed = path.split(['#', '?']).next().unwrap_or_default().trim();
    let caps = LOCATION.captures(trimmed).ok_or_else(invalid)?;

    let chapter = caps[1].parse::<u32>().map_err(|_| invalid())?;
    let part = caps[2].parse::<u32>().map_err(|_| invalid())?;
    PartKey::new(chapter, part).ok_or_else(invalid)
}

/// Computes prev/next links from the chapter listing.
#[derive(Debug, Clone, Copy)]
pub struct NavigationResolver<'a> {
    listing: &'a ChapterListing,
}

impl<'a> NavigationResolver<'a> {
    /// Resolver over the corpus listing.
    pub fn new(corpus: &'a ContentCorpus) -> Self {
        Self::from_listing(corpus.listing())
    }

    /// Resolver over a bare listing.
    pub fn from_listing(listing: &'a ChapterListing) -> Self {
        Self { listing }
    }

    /// Resolve a path such as `/book/ch3/p2`.
    pub fn resolve(&self, path: &str) -> Result<Navigation> {
        let key = parse_location(path)?;
        self.resolve_key(key)
    }

    /// Resolve a known location.
    pub fn resolve_key(&self, key: PartKey) -> Result<Navigation> {
        let chapter = self
            .listing
            .chapter(key.chapter)
            .ok_or_else(|| CoreError::not_found(key.chapter, key.part))?;
        let part = key
            .part_index()
            .and_then(|idx| chapter.parts.get(idx))
            .ok_or_else(|| CoreError::not_found(key.chapter, key.part))?;

        let navigation = Navigation {
            title: format!("{key} - {}", part.title),
            prev: self.prev_link(key),
            next: self.next_link(key),
        };

        debug!(
            %key,
            prev = %navigation.prev.path,
            next = %navigation.next.path,
            "Resolved navigation"
        );
        Ok(navigation)
    }

    fn next_link(&self, key: PartKey) -> NavigationLink {
        let same_chapter = self
            .listing
            .chapter(key.chapter)
            .and_then(|chapter| chapter.parts.get(key.part as usize));
        if let Some(part) = same_chapter {
            let next = PartKey {
                chapter: key.chapter,
                part: key.part + 1,
            };
            return NavigationLink::to_part(next, part, None);
        }

        let following = self
            .listing
            .chapter(key.chapter + 1)
            .and_then(|chapter| chapter.parts.first());
        match following {
            Some(part) => {
                let next = PartKey {
                    chapter: key.chapter + 1,
                    part: 1,
                };
                NavigationLink::to_part(next, part, next.chapter_index())
            }
            None => NavigationLink::empty(),
        }
    }

    fn prev_link(&self, key: PartKey) -> NavigationLink {
        if key.part > 1 {
            let prev = PartKey {
                chapter: key.chapter,
                part: key.part - 1,
            };
            if let Some(part) = self.listing.part(prev) {
                return NavigationLink::to_part(prev, part, None);
            }
        }

        let preceding = key
            .chapter
            .checked_sub(1)
            .and_then(|n| self.listing.chapter(n).map(|chapter| (n, chapter)));
        let Some((number, chapter)) = preceding else {
            return NavigationLink::empty();
        };
        match chapter.parts.last() {
            Some(part) => {
                let prev = PartKey {
                    chapter: number,
                    part: chapter.parts.len() as u32,
                };
                NavigationLink::to_part(prev, part, prev.chapter_index())
            }
            None => NavigationLink::empty(),
        }
    }
}
