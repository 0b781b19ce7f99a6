// src/output.rs

//! Plain-text URL output: one URL per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Write URLs to `writer`, one per line.
pub fn write_urls<W: Write>(mut writer: W, urls: &[String]) -> Result<()> {
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the URLs into it.
pub fn export_urls(path: &Path, urls: &[String]) -> Result<()> {
    let file = File::create(path)?;
    write_urls(BufWriter::new(file), urls)?;

    log::info!(
        "Successfully exported {} URLs to {}",
        urls.len(),
        path.display()
    );
    Ok(())
}
