use thiserror::Error;

/// Errors produced while scanning a hera header
#[derive(Error, Debug)]
pub enum ScanError {
    /// The lookahead window ran out before enough markers were seen.
    /// The stream has been rewound to where the scan started.
    #[error("class name not found within the first {limit} bytes")]
    ClassNameNotFound { limit: usize },

    #[error("couldn't find the header end marker")]
    TerminatorNotFound,

    #[error("I/O error while scanning: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Whether the file should simply be skipped rather than aborting the run
    pub fn is_skip(&self) -> bool {
        matches!(self, ScanError::ClassNameNotFound { .. } | ScanError::TerminatorNotFound)
    }
}
