use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::trace;

use crate::utils::file_utils;

/// Marker line that separates the class name block of a hera file
pub const HERA_SIGNATURE: &[u8; 10] = b" \r\n%%%% \r\n";

/// Number of leading bytes inspected for the signature
pub const SIGNATURE_WINDOW: usize = 32;

/// Check whether `data` starts like a hera file.
///
/// The signature must begin at an offset where it ends before the last byte of
/// the window, so only the first `SIGNATURE_WINDOW - 1` bytes are searched.
pub fn is_hera_data(data: &[u8]) -> bool {
    let head = &data[..data.len().min(SIGNATURE_WINDOW - 1)];
    head.windows(HERA_SIGNATURE.len()).any(|w| w == HERA_SIGNATURE)
}

/// Read the first bytes of `path` and check them for the hera signature
pub fn is_hera_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let mut head = Vec::with_capacity(SIGNATURE_WINDOW);
    file_utils::open_reader(path)?
        .take(SIGNATURE_WINDOW as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let found = is_hera_data(&head);
    trace!("Signature {} in {}", if found { "found" } else { "not found" }, path.display());
    Ok(found)
}
