//! Toc command - print the chapter listing

use std::path::Path;

use color_eyre::eyre::Result;
use ng4eb_core::{Chapter, PartKey};

use crate::Book;

/// Run the toc command.
pub fn run(config_path: &Path, filter: Option<&str>) -> Result<()> {
    let book = Book::open(config_path)?;
    print!("{}", render(&book, filter));
    Ok(())
}

/// Table of contents, optionally limited to chapters matching `filter`.
pub fn render(book: &Book, filter: Option<&str>) -> String {
    let listing = book.corpus.listing();
    let chapters: Vec<(usize, &Chapter)> = match filter {
        Some(query) => listing.filter(query),
        None => listing.chapters.iter().enumerate().collect(),
    };

    if chapters.is_empty() {
        return match filter {
            Some(query) => format!("No chapters match \"{query}\"\n"),
            None => "The book has no chapters\n".to_string(),
        };
    }

    let mut out = String::new();
    for (idx, chapter) in chapters {
        let number = idx as u32 + 1;
        out.push_str(&format!("Chapter {number}: {}\n", chapter.title));
        if let Some(description) = &chapter.description {
            out.push_str(&format!("  {description}\n"));
        }
        for (pidx, part) in chapter.parts.iter().enumerate() {
            let key = PartKey {
                chapter: number,
                part: pidx as u32 + 1,
            };
            out.push_str(&format!("  {key} {} ({})\n", part.title, key.url_path()));
            for section in &part.sections {
                out.push_str(&format!("      - {section}\n"));
            }
        }
        out.push('\n');
    }
    out
}
