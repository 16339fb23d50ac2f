use std::path::{Path, PathBuf};

use crate::error::{DocStampError, Result};

/// One file captured from the source directory.
#[derive(Debug, Clone)]
pub struct IndexedFile {
    pub path: PathBuf,
    pub name: String,
    pub stem: String,
}

impl IndexedFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, stem }
    }
}

/// Immutable listing of the source directory, captured once per run and never
/// refreshed. Entries are sorted by name so "first match wins" is
/// deterministic across runs.
#[derive(Debug)]
pub struct FileSnapshot {
    entries: Vec<IndexedFile>,
}

impl FileSnapshot {
    pub fn build(root: &Path) -> Result<Self> {
        let read = std::fs::read_dir(root).map_err(|e| {
            DocStampError::Index(format!("cannot list {}: {e}", root.display()))
        })?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| {
                DocStampError::Index(format!("cannot read entry in {}: {e}", root.display()))
            })?;
            let path = entry.path();
            if path.is_file() {
                entries.push(IndexedFile::new(path));
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { entries })
    }

    pub fn from_entries(mut entries: Vec<IndexedFile>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexedFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lists_only_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.tif"), b"x").unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let snapshot = FileSnapshot::build(dir.path()).unwrap();
        let names: Vec<_> = snapshot.entries().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.tif"]);
    }

    #[test]
    fn test_build_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileSnapshot::build(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_indexed_file_name_and_stem() {
        let file = IndexedFile::new(PathBuf::from("/pool/A001_scan.tif"));
        assert_eq!(file.name, "A001_scan.tif");
        assert_eq!(file.stem, "A001_scan");
    }
}
