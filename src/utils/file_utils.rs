use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::header::types::ScanOptions;

/// Check if a file has a specific extension
pub fn has_extension(path: impl AsRef<Path>, extension: &str) -> bool {
    let path = path.as_ref();
    if let Some(ext) = path.extension() {
        if let Some(ext_str) = ext.to_str() {
            return ext_str.eq_ignore_ascii_case(extension);
        }
    }
    false
}

/// Open a file for buffered binary reading
pub fn open_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Load scan options from a TOML file
pub fn load_options(path: impl AsRef<Path>) -> Result<ScanOptions> {
    let path = path.as_ref();
    debug!("Loading scan options from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let options: ScanOptions = toml::from_str(&content)
        .with_context(|| format!("Failed to parse options file {}", path.display()))?;

    if options.limit == 0 || options.marker_count == 0 {
        anyhow::bail!("limit and marker_count must be greater than zero in {}", path.display());
    }
    if i64::try_from(options.limit).is_err() {
        anyhow::bail!("limit {} is too large in {}", options.limit, path.display());
    }
    Ok(options)
}
