pub mod error;
pub mod scanner;
pub mod signature;
pub mod types;

pub use error::ScanError;
pub use scanner::HeaderScanner;
pub use types::{HeaderInfo, ScanOptions, ScanReport};
