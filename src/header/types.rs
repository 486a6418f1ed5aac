use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::header::error::ScanError;

/// Configuration options for header scanning
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Number of bytes the class name scan may read before giving up
    pub limit: usize,

    /// Byte that terminates the class name region
    #[serde(deserialize_with = "single_byte")]
    pub marker: u8,

    /// How many markers end the class name region
    pub marker_count: usize,

    /// Byte that ends the header region
    #[serde(deserialize_with = "single_byte")]
    pub terminator: u8,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            limit: 32,
            marker: b'%',
            marker_count: 4,
            terminator: b'\t',
        }
    }
}

fn single_byte<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(serde::de::Error::custom(format!(
            "expected a single ASCII character, got {:?}",
            value
        ))),
    }
}

/// A successfully scanned header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Class name bytes with trailing whitespace removed
    pub class_label: Vec<u8>,

    /// Stream offset right after the header terminator
    pub header_end: u64,
}

impl HeaderInfo {
    /// Class label as text; invalid UTF-8 is replaced
    pub fn label(&self) -> String {
        String::from_utf8_lossy(&self.class_label).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Ok,
    Skip,
}

/// Per-file outcome, as printed in JSON mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub path: PathBuf,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanReport {
    pub fn found(path: impl AsRef<Path>, info: &HeaderInfo) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            status: ScanStatus::Ok,
            class_label: Some(info.label()),
            header_end: Some(info.header_end),
            error: None,
        }
    }

    pub fn skipped(path: impl AsRef<Path>, error: &ScanError) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            status: ScanStatus::Skip,
            class_label: None,
            header_end: None,
            error: Some(error.to_string()),
        }
    }
}
