//! ng4eb CLI
//!
//! Search, navigate and render the book from the command line.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for ng4eb.
#[derive(Parser)]
#[command(name = "ng4eb", version, about = "Search and navigate the ng4eb book")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "book/config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Search every part for a query
    Search {
        /// Text to look for (case-insensitive)
        query: String,
        /// Return every hit instead of the quick preview
        #[arg(long)]
        full: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show prev/next links for a part (e.g. /book/ch3/p2)
    Nav {
        /// Book path
        path: String,
    },
    /// Render a part with section anchors and query highlights
    Show {
        /// Book path, optionally with ?query=...
        path: String,
        /// Query to highlight
        #[arg(short, long)]
        query: Option<String>,
        /// Emit an HTML page instead of text
        #[arg(long)]
        html: bool,
    },
    /// Print the table of contents
    Toc {
        /// Only chapters matching this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Generate the XML sitemap
    Sitemap {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    ng4eb::init_tracing(cli.verbose);

    match cli.command {
        Commands::Search { query, full, json } => {
            ng4eb::cmd::search::run(&cli.config, &query, full, json)?;
        }
        Commands::Nav { path } => {
            ng4eb::cmd::nav::run(&cli.config, &path)?;
        }
        Commands::Show { path, query, html } => {
            ng4eb::cmd::show::run(&cli.config, &path, query.as_deref(), html)?;
        }
        Commands::Toc { filter } => {
            ng4eb::cmd::toc::run(&cli.config, filter.as_deref())?;
        }
        Commands::Sitemap { output } => {
            ng4eb::cmd::sitemap::run(&cli.config, output.as_deref())?;
        }
        Commands::Check { strict } => {
            ng4eb::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_search_command_parsing() {
        let args = ["ng4eb", "search", "pipe"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("book/config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Search { query, full, json } => {
                assert_eq!(query, "pipe");
                assert!(!full);
                assert!(!json);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_full_json() {
        let args = ["ng4eb", "search", "--full", "--json", "ngIf"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Search { full, json, .. } => {
                assert!(full);
                assert!(json);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_nav_command_parsing() {
        let args = ["ng4eb", "nav", "/book/ch3/p2"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Nav { path } => assert_eq!(path, "/book/ch3/p2"),
            _ => panic!("Expected Nav command"),
        }
    }

    #[test]
    fn test_cli_show_command_parsing() {
        let args = ["ng4eb", "show", "/book/ch5/p1", "--query", "service", "--html"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Show { path, query, html } => {
                assert_eq!(path, "/book/ch5/p1");
                assert_eq!(query.as_deref(), Some("service"));
                assert!(html);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_toc_and_sitemap_parsing() {
        let cli = Cli::parse_from(["ng4eb", "toc", "-f", "routing"]);
        match cli.command {
            Commands::Toc { filter } => assert_eq!(filter.as_deref(), Some("routing")),
            _ => panic!("Expected Toc command"),
        }

        let cli = Cli::parse_from(["ng4eb", "sitemap", "--output", "sitemap.xml"]);
        match cli.command {
            Commands::Sitemap { output } => {
                assert_eq!(output, Some(PathBuf::from("sitemap.xml")));
            }
            _ => panic!("Expected Sitemap command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["ng4eb", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_and_config() {
        let args = ["ng4eb", "-vv", "--config", "site.toml", "toc"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }
}
