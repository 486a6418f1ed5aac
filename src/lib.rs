pub mod header;
pub mod utils;

// Re-export main types and functions for easier access
pub use header::error::ScanError;
pub use header::scanner::{FileCollector, HeaderScanner};
pub use header::signature::{is_hera_data, is_hera_file};
pub use header::types::{HeaderInfo, ScanOptions, ScanReport, ScanStatus};

// Re-export utility functions
pub use utils::file_utils;
