//! ng4eb Search Library
//!
//! In-memory search over the book corpus and query highlighting of
//! rendered parts.
//!
//! # Example
//!
//! ```no_run
//! use ng4eb_core::{Config, loader::load_corpus};
//! use ng4eb_search::SearchIndexer;
//!
//! let config = Config::load(std::path::Path::new("book/config.toml")).unwrap();
//! let corpus = load_corpus(&config).unwrap();
//! let indexer = SearchIndexer::new(&corpus);
//! for hit in indexer.quick_search("observable") {
//!     println!("{} -> {}", hit.title, hit.url);
//! }
//! ```

pub mod highlight;
pub mod indexer;

pub use highlight::{Decoration, HeadingRef, MatchCursor, MatchRef, QueryHighlighter};
pub use indexer::{SearchIndexer, SearchOptions, SearchResult, make_snippet};
