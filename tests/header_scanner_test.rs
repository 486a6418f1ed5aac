#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Read, Seek};
    use std::path::{Path, PathBuf};
    use anyhow::Result;
    use tempfile::tempdir;

    use hera_info::file_utils;
    use hera_info::{HeaderScanner, ScanError};

    // Helper function to create a test hera file
    fn create_hera_file(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = dir.join(name);
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    #[test]
    fn test_scan_file_on_disk() -> Result<()> {
        let temp_dir = tempdir()?;
        let file = create_hera_file(
            temp_dir.path(),
            "sample.hera",
            b"HeraVideoClass\n%%%%version=3;flags=0\tPAYLOAD",
        )?;

        let mut reader = file_utils::open_reader(&file)?;
        let header = HeaderScanner::with_defaults().scan(&mut reader)?;
        assert_eq!(header.label(), "HeraVideoClass");

        // The rest of the file is untouched
        let mut rest = String::new();
        reader.read_to_string(&mut rest)?;
        assert_eq!(rest, "PAYLOAD");
        Ok(())
    }

    #[test]
    fn test_rewind_through_buffered_reader() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut content = b"no markers in this class name region at all".to_vec();
        content.push(b'\t');
        let file = create_hera_file(temp_dir.path(), "plain.txt", &content)?;

        let mut reader = file_utils::open_reader(&file)?;
        let result = HeaderScanner::with_defaults().scan(&mut reader);
        assert!(matches!(result, Err(ScanError::ClassNameNotFound { limit: 32 })));
        assert_eq!(reader.stream_position()?, 0);
        Ok(())
    }

    #[test]
    fn test_missing_terminator_leaves_reader_at_end() -> Result<()> {
        let temp_dir = tempdir()?;
        let file = create_hera_file(temp_dir.path(), "cut.hera", b"Cls%%%%truncated header")?;

        let mut reader = file_utils::open_reader(&file)?;
        let result = HeaderScanner::with_defaults().scan(&mut reader);
        assert!(matches!(result, Err(ScanError::TerminatorNotFound)));
        assert_eq!(reader.stream_position()?, fs::metadata(&file)?.len());
        Ok(())
    }

    #[test]
    fn test_non_utf8_class_label() -> Result<()> {
        let temp_dir = tempdir()?;
        let file = create_hera_file(temp_dir.path(), "bin.hera", b"A\xffB%%%%\t")?;

        let mut reader = file_utils::open_reader(&file)?;
        let header = HeaderScanner::with_defaults().scan(&mut reader)?;
        assert_eq!(header.class_label, b"A\xffB".to_vec());
        assert_eq!(header.label(), "A\u{fffd}B");
        Ok(())
    }
}
