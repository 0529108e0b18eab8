//! ng4eb CLI Library
//!
//! Command implementations for the `ng4eb` binary. Each command has a
//! `render` function that produces its output as a string and a `run`
//! function that loads the book and prints it.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ng4eb::{Book, cmd};
//!
//! let book = Book::open(Path::new("book/config.toml")).unwrap();
//! print!("{}", cmd::search::render(&book, "pipe", false, false).unwrap());
//! ```

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

pub mod cmd;

pub use ng4eb_core::{Config, ContentCorpus};

/// Loaded configuration and content.
#[derive(Debug)]
pub struct Book {
    pub config: Config,
    pub corpus: ContentCorpus,
}

impl Book {
    /// Load the configuration (with `NG4EB__` environment overrides) and
    /// the corpus it points at.
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = Config::load_with_env(config_path)
            .wrap_err_with(|| format!("Failed to load {}", config_path.display()))?;
        let corpus = ng4eb_core::loader::load_corpus(&config)
            .wrap_err("Failed to load book content")?;
        Ok(Self { config, corpus })
    }
}

/// Initialize tracing with the specified verbosity level.
///
/// `0` = WARN, `1` = INFO, `2` = DEBUG, `3+` = TRACE. `RUST_LOG` directives
/// are honored on top of that.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
