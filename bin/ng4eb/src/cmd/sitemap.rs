//! Sitemap command - write the XML sitemap

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use color_eyre::eyre::{Result, WrapErr};
use ng4eb_nav::Sitemap;

use crate::Book;

/// Run the sitemap command. Writes to `output` or stdout.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let book = Book::open(config_path)?;
    let sitemap = Sitemap::from_corpus(&book.config, &book.corpus);

    match output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Cannot create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            sitemap.write_to(&mut writer)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), urls = sitemap.urls().len(), "Wrote sitemap");
        }
        None => print!("{}", sitemap.to_xml()),
    }
    Ok(())
}
