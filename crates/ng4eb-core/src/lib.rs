//! ng4eb Core Library
//!
//! Core types, configuration, error handling and the content corpus for the
//! ng4eb book engine.

pub mod config;
pub mod content;
pub mod corpus;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod node;

pub use config::Config;
pub use content::{Chapter, ChapterEntry, ChapterListing, Part, PartKey};
pub use corpus::{ContentCorpus, CorpusDocument};
pub use error::{CoreError, Result};
pub use frontmatter::PartFrontmatter;
pub use node::{ContentNode, Element, NodeKind};
