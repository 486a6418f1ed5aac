use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use log::{debug, trace, warn};
use walkdir::WalkDir;

use crate::utils::file_utils;

/// File collector for expanding command line paths into hera files
#[derive(Debug, Default)]
pub struct FileCollector {
    /// Whether directory arguments are walked
    recursive: bool,

    /// Extensions accepted while walking; empty accepts every file
    valid_extensions: Vec<String>,
}

impl FileCollector {
    /// Create a new file collector that only accepts plain file paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new file collector that descends into directories
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            valid_extensions: Vec::new(),
        }
    }

    /// Add a valid file extension for walked files
    pub fn add_extension(&mut self, extension: &str) {
        let extension = extension.trim_start_matches('.');
        if !self.valid_extensions.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
            self.valid_extensions.push(extension.to_string());
        }
    }

    /// Get the list of valid file extensions
    pub fn extensions(&self) -> &[String] {
        &self.valid_extensions
    }

    /// Expand the given paths, in order, into the files to scan.
    ///
    /// Paths that are not directories are passed through untouched, missing
    /// ones included, so that opening them reports the real error.
    pub fn collect_files(&self, paths: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            if !path.is_dir() {
                files.push(path.to_path_buf());
                continue;
            }
            if !self.recursive {
                bail!("{} is a directory (use --recursive)", path.display());
            }
            self.walk_dir(path, &mut files);
        }

        debug!("Collected {} files for scanning", files.len());
        Ok(files)
    }

    fn walk_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        debug!("Collecting files from directory: {}", dir.display());

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if self.valid_extensions.is_empty() || self.accepts(path) {
                trace!("Found file: {}", path.display());
                files.push(path.to_owned());
            }
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        self.valid_extensions
            .iter()
            .any(|ext| file_utils::has_extension(path, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_plain_paths_pass_through() -> Result<()> {
        let collector = FileCollector::new();
        let files = collector.collect_files(&["b.hera", "missing/a.hera"])?;
        assert_eq!(files, vec![PathBuf::from("b.hera"), PathBuf::from("missing/a.hera")]);
        Ok(())
    }

    #[test]
    fn test_directory_requires_recursive() -> Result<()> {
        let dir = tempdir()?;
        let err = FileCollector::new().collect_files(&[dir.path()]).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
        Ok(())
    }

    #[test]
    fn test_recursive_walk_with_extension_filter() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("sub"))?;
        fs::write(dir.path().join("b.hera"), "x")?;
        fs::write(dir.path().join("a.HERA"), "x")?;
        fs::write(dir.path().join("notes.txt"), "x")?;
        fs::write(dir.path().join("sub").join("c.hera"), "x")?;

        let mut collector = FileCollector::recursive();
        collector.add_extension(".hera");
        collector.add_extension("hera");
        assert_eq!(collector.extensions(), &["hera".to_string()]);

        let files = collector.collect_files(&[dir.path()])?;
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.HERA"), PathBuf::from("b.hera"), PathBuf::from("sub/c.hera")]
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_recursive_walk_survives_symlink_loop() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("data.hera"), "x")?;
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop"))?;

        let files = FileCollector::recursive().collect_files(&[dir.path()])?;
        assert_eq!(files, vec![dir.path().join("data.hera")]);
        Ok(())
    }

    #[test]
    fn test_recursive_walk_without_filter() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("one"), "x")?;
        fs::write(dir.path().join("two.bin"), "x")?;

        let files = FileCollector::recursive().collect_files(&[dir.path()])?;
        assert_eq!(files.len(), 2);
        Ok(())
    }
}
