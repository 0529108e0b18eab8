//! Search command - find parts containing a query

use std::path::Path;

use color_eyre::eyre::Result;
use ng4eb_search::{SearchIndexer, SearchOptions};

use crate::Book;

/// Run the search command.
pub fn run(config_path: &Path, query: &str, full: bool, json: bool) -> Result<()> {
    let book = Book::open(config_path)?;
    print!("{}", render(&book, query, full, json)?);
    Ok(())
}

/// Search the book. A quick search is capped at the configured limit; a
/// full search returns every hit with longer snippets.
pub fn render(book: &Book, query: &str, full: bool, json: bool) -> Result<String> {
    let options = SearchOptions::from(&book.config.search);
    let indexer = SearchIndexer::with_options(&book.corpus, options);
    let results = if full {
        indexer.full_search(query)
    } else {
        indexer.quick_search(query)
    };

    tracing::info!(query, full, hits = results.len(), "Search finished");

    if json {
        let mut out = serde_json::to_string_pretty(&results)?;
        out.push('\n');
        return Ok(out);
    }

    if results.is_empty() {
        return Ok(format!("No results for \"{query}\"\n"));
    }

    let mut out = String::new();
    for result in &results {
        out.push_str(&format!("{}\n", result.title));
        out.push_str(&format!(
            "  {}?query={}\n",
            result.url,
            urlencoding::encode(&result.matched_query)
        ));
        out.push_str(&format!("  {}\n\n", result.snippet));
    }
    Ok(out)
}
