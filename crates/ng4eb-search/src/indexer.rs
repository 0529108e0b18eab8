//! Literal substring search over the content corpus.

use ng4eb_core::{ContentCorpus, config::SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result limits and snippet lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Result cap used by [`SearchIndexer::quick_search`].
    pub quick_limit: usize,

    /// Snippet length in characters when results are capped.
    pub quick_snippet_len: usize,

    /// Snippet length in characters when results are uncapped.
    pub full_snippet_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            quick_limit: 3,
            quick_snippet_len: 100,
            full_snippet_len: 300,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            quick_limit: config.quick_limit,
            quick_snippet_len: config.quick_snippet_len,
            full_snippet_len: config.full_snippet_len,
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `Ch{N} - P{M} - {part title}`.
    pub title: String,

    /// Leading excerpt of the part body.
    pub snippet: String,

    /// Deep link, `/book/ch{N}/p{M}`.
    pub url: String,

    /// The query as given by the caller.
    pub matched_query: String,
}

/// Case-insensitive substring search across every part of the book.
///
/// Results come back in corpus order (chapter, then part). There is no
/// relevance ranking.
#[derive(Debug, Clone)]
pub struct SearchIndexer<'a> {
    corpus: &'a ContentCorpus,
    options: SearchOptions,
    lowered: Vec<String>,
}

impl<'a> SearchIndexer<'a> {
    /// Create an indexer with default options.
    pub fn new(corpus: &'a ContentCorpus) -> Self {
        Self::with_options(corpus, SearchOptions::default())
    }

    /// Create an indexer with explicit options.
    pub fn with_options(corpus: &'a ContentCorpus, options: SearchOptions) -> Self {
        let lowered = corpus.entries().map(|e| e.body.to_lowercase()).collect();
        Self {
            corpus,
            options,
            lowered,
        }
    }

    /// Active options.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Search the corpus.
    ///
    /// An empty query matches every part. When `max_results` is set the
    /// search stops after that many hits and uses the short snippet length.
    pub fn search(&self, query: &str, max_results: Option<usize>) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        let snippet_len = match max_results {
            Some(_) => self.options.quick_snippet_len,
            None => self.options.full_snippet_len,
        };

        let results: Vec<SearchResult> = self
            .corpus
            .entries()
            .zip(&self.lowered)
            .filter(|(_, lowered)| lowered.contains(&needle))
            .take(max_results.unwrap_or(usize::MAX))
            .map(|(entry, _)| SearchResult {
                title: format!(
                    "Ch{} - P{} - {}",
                    entry.key.chapter, entry.key.part, entry.title
                ),
                snippet: make_snippet(&entry.body, snippet_len),
                url: entry.key.url_path(),
                matched_query: query.to_string(),
            })
            .collect();

        debug!(query, ?max_results, hits = results.len(), "Searched corpus");
        results
    }

    /// Bounded search for inline previews.
    pub fn quick_search(&self, query: &str) -> Vec<SearchResult> {
        self.search(query, Some(self.options.quick_limit))
    }

    /// Unbounded search for the results page.
    pub fn full_search(&self, query: &str) -> Vec<SearchResult> {
        self.search(query, None)
    }
}

/// First `len` characters of `body` with newlines turned into spaces and
/// heading markers dropped, trimmed, with `...` appended.
pub fn make_snippet(body: &str, len: usize) -> String {
    let head: String = body.chars().take(len).collect();
    let cleaned = head.replace('\n', " ").replace('#', "");
    format!("{}...", cleaned.trim())
}
