//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use ng4eb_core::{Config, ContentCorpus, loader::load_corpus};
use ng4eb_nav::NavigationResolver;
use ng4eb_parser::MarkdownParser;
use ng4eb_search::QueryHighlighter;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate the configuration, the corpus and the navigation chain.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            return result;
        }
    };
    check_config_values(&config, &mut result);

    println!("\nChecking content...");
    let corpus = match load_corpus(&config) {
        Ok(corpus) => {
            println!(
                "  ✓ {} chapters, {} parts",
                corpus.listing().len(),
                corpus.len()
            );
            corpus
        }
        Err(e) => {
            result.add_error(format!("Content error: {e}"));
            println!("  ✗ Content invalid: {e}");
            return result;
        }
    };
    check_parts(&corpus, &mut result);

    println!("\nChecking navigation...");
    check_navigation(&corpus, &mut result);

    result
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.description.is_none() {
        result.add_warning("site.description is not set");
    }
}

/// Every part should carry an SEO description, and every section the
/// listing names should appear as a section heading of the part.
fn check_parts(corpus: &ContentCorpus, result: &mut ValidationResult) {
    let parser = MarkdownParser::new();
    let highlighter = QueryHighlighter::new();
    let mut warned = 0;

    for entry in corpus.entries() {
        let key = entry.key;
        let before = result.warnings.len();

        let described = corpus
            .frontmatter(key)
            .map(|fm| fm.description.is_some())
            .unwrap_or(false);
        if !described {
            result.add_warning(format!("{key} ({}): missing SEO description", entry.title));
        }

        let mut blocks = parser.parse_body(&entry.body);
        let headings = highlighter.decorate(&mut blocks, None).headings;
        for section in &entry.sections {
            if !headings.iter().any(|h| h.text.trim() == section) {
                result.add_warning(format!(
                    "{key} ({}): listed section '{section}' has no heading",
                    entry.title
                ));
            }
        }

        if result.warnings.len() > before {
            warned += 1;
        }
    }

    if warned == 0 {
        println!("  ✓ All {} parts have descriptions and headings", corpus.len());
    } else {
        println!("  ⚠ {warned}/{} parts have warnings", corpus.len());
    }
}

/// Walk the `next` links from the first part and make sure every part is
/// visited exactly once, in order.
fn check_navigation(corpus: &ContentCorpus, result: &mut ValidationResult) {
    let resolver = NavigationResolver::new(corpus);
    let expected: Vec<String> = corpus.entries().map(|e| e.key.url_path()).collect();

    let mut visited = Vec::with_capacity(expected.len());
    let mut current = corpus.first_key().map(|key| key.url_path());

    while let Some(path) = current.take() {
        if visited.len() > expected.len() {
            result.add_error("Navigation does not terminate");
            return;
        }
        match resolver.resolve(&path) {
            Ok(navigation) => {
                if !navigation.next.is_empty() {
                    current = Some(navigation.next.path);
                }
                visited.push(path);
            }
            Err(e) => {
                result.add_error(format!("Navigation error at {path}: {e}"));
                return;
            }
        }
    }

    if visited == expected {
        println!("  ✓ Navigation chain covers all {} parts", expected.len());
    } else {
        result.add_error(format!(
            "Navigation visited {} of {} parts",
            visited.len(),
            expected.len()
        ));
        println!("  ✗ Navigation chain is broken");
    }
}
