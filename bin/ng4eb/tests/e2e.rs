//! End-to-end tests against the sample book in `book/`.

use std::path::{Path, PathBuf};

use ng4eb::{Book, cmd};
use ng4eb_core::PartKey;
use ng4eb_nav::{NavigationLink, NavigationResolver};
use ng4eb_parser::{MarkdownParser, render_html};
use ng4eb_search::{QueryHighlighter, SearchIndexer};
use tempfile::TempDir;

fn sample_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../book/config.toml")
}

fn sample_book() -> Option<Book> {
    let path = sample_config();
    if !path.exists() {
        eprintln!("Skipping: sample book not found at {}", path.display());
        return None;
    }
    Some(Book::open(&path).expect("sample book loads"))
}

fn write_book(dir: &Path, listing: &str, parts: &[(&str, &str)]) -> PathBuf {
    let content = dir.join("content");
    std::fs::create_dir_all(&content).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        r#"
[site]
title = "Test Book"
base_url = "https://example.com"
description = "A test book"
"#,
    )
    .unwrap();
    std::fs::write(dir.join("listing.toml"), listing).unwrap();
    for (name, body) in parts {
        std::fs::write(content.join(name), body).unwrap();
    }
    dir.join("config.toml")
}

const TWO_PARTS: &str = r#"
[[chapters]]
title = "Only chapter"

[[chapters.parts]]
title = "First"

[[chapters.parts]]
title = "Second"
"#;

#[test]
fn test_sample_book_loads() {
    let Some(book) = sample_book() else { return };

    assert_eq!(book.corpus.listing().len(), 6);
    assert_eq!(book.corpus.len(), 15);
    assert_eq!(book.corpus.first_key(), PartKey::new(1, 1));
    assert_eq!(book.corpus.last_key(), PartKey::new(6, 3));
    assert!(book.corpus.get_body(5, 1).unwrap().starts_with("# Using Services"));
}

#[test]
fn test_empty_query_matches_every_part() {
    let Some(book) = sample_book() else { return };
    let indexer = SearchIndexer::new(&book.corpus);

    let results = indexer.full_search("");
    assert_eq!(results.len(), book.corpus.len());

    let urls: Vec<String> = results.into_iter().map(|r| r.url).collect();
    let expected: Vec<String> = book.corpus.entries().map(|e| e.key.url_path()).collect();
    assert_eq!(urls, expected);
}

#[test]
fn test_quick_search_is_bounded() {
    let Some(book) = sample_book() else { return };
    let indexer = SearchIndexer::new(&book.corpus);

    let quick = indexer.quick_search("angular");
    let full = indexer.full_search("angular");

    assert_eq!(quick.len(), 3);
    assert!(full.len() > quick.len());
    for (q, f) in quick.iter().zip(&full) {
        assert_eq!(q.url, f.url);
        assert!(q.snippet.chars().count() <= 103);
        assert!(f.snippet.chars().count() <= 303);
    }
}

#[test]
fn test_search_is_case_insensitive() {
    let Some(book) = sample_book() else { return };
    let indexer = SearchIndexer::new(&book.corpus);

    let urls = |q: &str| -> Vec<String> {
        indexer.full_search(q).into_iter().map(|r| r.url).collect()
    };
    let lower = urls("service");
    assert!(lower.contains(&"/book/ch5/p1".to_string()));
    assert_eq!(lower, urls("SERVICE"));
    assert_eq!(lower, urls("Service"));
}

#[test]
fn test_search_urls_are_deterministic() {
    let Some(book) = sample_book() else { return };
    let indexer = SearchIndexer::new(&book.corpus);

    for result in indexer.full_search("pipe") {
        let key = ng4eb_nav::parse_location(&result.url).unwrap();
        assert_eq!(result.url, format!("/book/ch{}/p{}", key.chapter, key.part));
        let entry = book.corpus.entry(key).unwrap();
        assert!(entry.body.to_lowercase().contains("pipe"));
        assert!(result.title.starts_with(&format!("Ch{} - P{} - ", key.chapter, key.part)));
    }
}

#[test]
fn test_navigation_boundaries() {
    let Some(book) = sample_book() else { return };
    let resolver = NavigationResolver::new(&book.corpus);

    let first = resolver.resolve("/book/ch1/p1").unwrap();
    assert_eq!(first.prev, NavigationLink::empty());
    assert_eq!(first.title, "Ch1-P1 - What is Angular");

    let last = resolver.resolve("/book/ch6/p3").unwrap();
    assert_eq!(last.next, NavigationLink::empty());

    let crossing = resolver.resolve("/book/ch2/p3").unwrap();
    assert_eq!(crossing.next.title, "Ch3 - P1 - Using Components & Modules");
    assert_eq!(crossing.next.chapter_index, Some(2));
}

#[test]
fn test_navigation_adjacency_round_trip() {
    let Some(book) = sample_book() else { return };
    let resolver = NavigationResolver::new(&book.corpus);

    for entry in book.corpus.entries().skip(1) {
        let here = entry.key.url_path();
        let prev = resolver.resolve(&here).unwrap().prev;
        assert!(!prev.is_empty(), "{here}");
        assert_eq!(resolver.resolve(&prev.path).unwrap().next.path, here);
    }
}

#[test]
fn test_highlight_clearing_is_idempotent() {
    let Some(book) = sample_book() else { return };
    let body = book.corpus.get_body(5, 1).unwrap();

    let parser = MarkdownParser::new();
    let highlighter = QueryHighlighter::new();

    let mut blocks = parser.parse_body(body);
    let first = highlighter.decorate(&mut blocks, Some("service"));
    assert!(!first.matches.is_empty());
    let first_html = render_html(&blocks);

    highlighter.decorate(&mut blocks, Some("counter"));
    let again = highlighter.decorate(&mut blocks, Some("service"));

    assert_eq!(again.matches.len(), first.matches.len());
    assert_eq!(render_html(&blocks), first_html);
    assert!(!first_html.contains("<span class=\"query\"><span"));

    highlighter.decorate(&mut blocks, None);
    let mut clean = parser.parse_body(body);
    highlighter.decorate(&mut clean, None);
    assert_eq!(blocks, clean);
}

#[test]
fn test_highlight_headings_follow_listing_sections() {
    let Some(book) = sample_book() else { return };
    let entry = book.corpus.entry(PartKey::new(3, 2).unwrap()).unwrap();

    let mut blocks = MarkdownParser::new().parse_body(&entry.body);
    let decoration = QueryHighlighter::new().decorate(&mut blocks, None);

    let texts: Vec<&str> = decoration.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, entry.sections);
    let ids: Vec<&str> = decoration.headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_search_command_output() {
    let Some(book) = sample_book() else { return };

    let text = cmd::search::render(&book, "ngModel", true, false).unwrap();
    assert!(text.contains("Ch6 - P1 - Using Template-driven Forms"));
    assert!(text.contains("/book/ch6/p1?query=ngModel"));

    let json = cmd::search::render(&book, "ngModel", true, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["url"], "/book/ch6/p1");

    let none = cmd::search::render(&book, "svelte", false, false).unwrap();
    assert_eq!(none, "No results for \"svelte\"\n");
}

#[test]
fn test_search_link_round_trips_query() {
    let Some(book) = sample_book() else { return };
    let query = "components & modules";

    let text = cmd::search::render(&book, query, true, false).unwrap();
    let link = text
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("/book/ch3/p1?query="))
        .expect("link for ch3/p1");
    assert_eq!(link, "/book/ch3/p1?query=components%20%26%20modules");
    assert_eq!(cmd::show::query_from_path(link).as_deref(), Some(query));

    let shown = cmd::show::render(&book, link, None, false).unwrap();
    assert!(shown.contains(&format!("match(es) for \"{query}\"")));
    assert!(shown.contains("[components & modules]"));
}

#[test]
fn test_nav_command_output() {
    let Some(book) = sample_book() else { return };

    let text = cmd::nav::render(&book, "/book/ch4/p2").unwrap();
    assert!(text.starts_with("Ch4-P2 - Advanced Routing Techniques\n"));
    assert!(text.contains("prev: Ch4 - P1 - Using Routing (/book/ch4/p1)"));
    assert!(text.contains("[chapter 5]"));

    assert!(cmd::nav::render(&book, "/book/chapter-one").is_err());
    assert!(cmd::nav::render(&book, "/book/ch9/p1").is_err());
}

#[test]
fn test_show_command_highlights() {
    let Some(book) = sample_book() else { return };

    let text = cmd::show::render(&book, "/book/ch5/p1?query=service", None, false).unwrap();
    assert!(text.starts_with("Ch5-P1 - Using Services"));
    assert!(text.contains("#1 How services work"));
    assert!(text.contains("[service]"));
    assert!(text.contains("[Service]"));

    let html = cmd::show::render(&book, "/book/ch5/p1", Some("injector"), true).unwrap();
    assert!(html.contains("<title>Ch5-P1 - Using Services - ng4eb</title>"));
    assert!(html.contains("<span class=\"query\">injector</span>"));
    assert!(html.contains("<h2 id=\"1\">How services work</h2>"));
    assert!(html.contains("rel=\"next\" href=\"/book/ch5/p2\""));
}

#[test]
fn test_toc_command_filter() {
    let Some(book) = sample_book() else { return };

    let all = cmd::toc::render(&book, None);
    assert_eq!(all.matches("Chapter ").count(), 6);

    let routing = cmd::toc::render(&book, Some("ROUTING"));
    assert!(routing.starts_with("Chapter 4: Routing\n"));
    assert_eq!(routing.matches("Chapter ").count(), 1);

    let ngif = cmd::toc::render(&book, Some("ngif"));
    assert!(ngif.starts_with("Chapter 3: Components & Modules\n"));

    assert_eq!(
        cmd::toc::render(&book, Some("svelte")),
        "No chapters match \"svelte\"\n"
    );
}

#[test]
fn test_check_passes_on_sample_book() {
    let path = sample_config();
    if !path.exists() {
        return;
    }

    let result = cmd::check::validate(&path);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_check_reports_missing_part() {
    let dir = TempDir::new().unwrap();
    let config = write_book(dir.path(), TWO_PARTS, &[("ch1p1.md", "# First\n")]);

    let result = cmd::check::validate(&config);
    assert!(result.has_errors());
    assert!(result.errors[0].contains("ch1p2"));
}

#[test]
fn test_check_warns_on_missing_description() {
    let dir = TempDir::new().unwrap();
    let config = write_book(
        dir.path(),
        TWO_PARTS,
        &[
            ("ch1p1.md", "---\ndescription: \"First part\"\n---\n# First\n"),
            ("ch1p2.md", "# Second\n"),
        ],
    );

    let result = cmd::check::validate(&config);
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("Ch1-P2"));
    assert!(cmd::check::run(&config, true).is_err());
    assert!(cmd::check::run(&config, false).is_ok());
}

#[test]
fn test_book_open_rejects_malformed_key() {
    let dir = TempDir::new().unwrap();
    let config = write_book(
        dir.path(),
        TWO_PARTS,
        &[
            ("ch1p1.md", "# First\n"),
            ("ch1p2.md", "# Second\n"),
            ("chapter3.md", "# Stray\n"),
        ],
    );

    let err = Book::open(&config).unwrap_err();
    assert!(format!("{err:?}").contains("malformed corpus key"));
}
