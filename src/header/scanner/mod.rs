mod file_collector;

use std::io::{self, Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::header::error::ScanError;
use crate::header::types::{HeaderInfo, ScanOptions};

// Re-export from submodules
pub use file_collector::FileCollector;

/// Header scanner responsible for extracting the class label of a hera file
#[derive(Debug, Clone, Default)]
pub struct HeaderScanner {
    /// Scan constants
    options: ScanOptions,
}

impl HeaderScanner {
    /// Create a new header scanner with the given options
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Create a new header scanner with default options
    pub fn with_defaults() -> Self {
        Self::new(ScanOptions::default())
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the header at the current position of `reader`.
    ///
    /// Reads the class name up to the final marker, then consumes the header
    /// region up to and including the terminator byte. On success the reader
    /// sits right after the terminator. If the class name does not end within
    /// the lookahead limit the reader is moved back by `limit` bytes; if the
    /// terminator is never found the reader is left at end of data.
    pub fn scan<R: Read + Seek>(&self, reader: &mut R) -> Result<HeaderInfo, ScanError> {
        let mut class_label = self.read_class_name(reader)?;
        self.skip_header(reader)?;

        let header_end = reader.stream_position()?;
        trim_trailing_whitespace(&mut class_label);
        debug!(
            "Found class {:?}, header ends at offset {}",
            String::from_utf8_lossy(&class_label),
            header_end
        );

        Ok(HeaderInfo { class_label, header_end })
    }

    fn read_class_name<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>, ScanError> {
        let ScanOptions { limit, marker, marker_count, .. } = self.options;

        let mut class_name = Vec::new();
        let mut read = 0;
        let mut markers = 0;
        let mut at_eof = false;

        // Markers count wherever they appear in the window, adjacent or not.
        // The read that hits end of data still uses up one slot of the window.
        while read < limit && !at_eof && markers < marker_count {
            match next_byte(reader)? {
                None => at_eof = true,
                Some(byte) if byte == marker => markers += 1,
                Some(byte) => class_name.push(byte),
            }
            read += 1;
        }

        if read == limit && markers < marker_count {
            let consumed = if at_eof { read - 1 } else { read };
            trace!("Saw {} of {} markers in {} bytes, rewinding {}", markers, marker_count, limit, consumed);
            let offset = i64::try_from(consumed).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("cannot rewind {} bytes", consumed))
            })?;
            reader.seek(SeekFrom::Current(-offset))?;
            return Err(ScanError::ClassNameNotFound { limit });
        }

        Ok(class_name)
    }

    fn skip_header<R: Read>(&self, reader: &mut R) -> Result<(), ScanError> {
        let mut skipped = 0usize;
        loop {
            match next_byte(reader)? {
                Some(byte) if byte == self.options.terminator => break,
                Some(_) => skipped += 1,
                None => return Err(ScanError::TerminatorNotFound),
            }
        }
        trace!("Skipped {} header bytes", skipped);
        Ok(())
    }
}

fn next_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Class names may span several lines; only the tail is trimmed
fn trim_trailing_whitespace(bytes: &mut Vec<u8>) {
    while let Some(&last) = bytes.last() {
        if matches!(last, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0B) {
            bytes.pop();
        } else {
            break;
        }
    }
}
