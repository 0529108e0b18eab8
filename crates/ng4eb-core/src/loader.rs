//! Filesystem content loader.
//!
//! Reads the chapter listing and every `ch{N}p{M}.md` file under the
//! content directory, then hands them to [`ContentCorpus`] for validation.

use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    config::Config,
    content::ChapterListing,
    corpus::{ContentCorpus, CorpusDocument},
    error::{CoreError, Result},
    frontmatter::parse_frontmatter,
};

/// Load the corpus described by a configuration.
pub fn load_corpus(config: &Config) -> Result<ContentCorpus> {
    load_from_paths(&config.listing_path(), &config.content_dir())
}

/// Load a corpus from an explicit listing file and content directory.
pub fn load_from_paths(listing_path: &Path, content_dir: &Path) -> Result<ContentCorpus> {
    let listing = load_listing(listing_path)?;
    let documents = load_documents(content_dir)?;

    info!(
        chapters = listing.len(),
        documents = documents.len(),
        dir = %content_dir.display(),
        "Loaded book content"
    );

    ContentCorpus::from_documents(listing, documents)
}

/// Read and parse the listing TOML file.
pub fn load_listing(path: &Path) -> Result<ChapterListing> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        CoreError::config_with_source(format!("Cannot read listing {}", path.display()), e)
    })?;
    ChapterListing::from_toml(&source)
}

/// Collect every markdown part under `dir`, sorted by file path.
pub fn load_documents(dir: &Path) -> Result<Vec<CorpusDocument>> {
    if !dir.is_dir() {
        return Err(CoreError::config(format!(
            "Content directory not found: {}",
            dir.display()
        )));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            CoreError::config_with_source(format!("Cannot walk {}", dir.display()), e)
        })?;
        let path = entry.path();

        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("md")
        {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                CoreError::integrity(format!("unreadable file name: {}", path.display()))
            })?
            .to_string();

        let source = std::fs::read_to_string(path)?;
        let (frontmatter, body) = parse_frontmatter(&source, path)?;

        debug!(key, path = %path.display(), "Read part document");
        documents.push(CorpusDocument {
            key,
            body,
            frontmatter,
        });
    }

    Ok(documents)
}
