//! Nav command - show prev/next links for a part

use std::path::Path;

use color_eyre::eyre::Result;
use ng4eb_nav::{NavigationLink, NavigationResolver};

use crate::Book;

/// Run the nav command.
pub fn run(config_path: &Path, path: &str) -> Result<()> {
    let book = Book::open(config_path)?;
    print!("{}", render(&book, path)?);
    Ok(())
}

/// Resolve prev/next navigation for a book path.
pub fn render(book: &Book, path: &str) -> Result<String> {
    let navigation = NavigationResolver::new(&book.corpus).resolve(path)?;

    let mut out = format!("{}\n", navigation.title);
    out.push_str(&format!("  prev: {}\n", describe(&navigation.prev)));
    out.push_str(&format!("  next: {}\n", describe(&navigation.next)));
    Ok(out)
}

fn describe(link: &NavigationLink) -> String {
    if link.is_empty() {
        return "(none)".to_string();
    }
    match link.chapter_index {
        Some(index) => format!("{} ({}) [chapter {}]", link.title, link.path, index + 1),
        None => format!("{} ({})", link.title, link.path),
    }
}
