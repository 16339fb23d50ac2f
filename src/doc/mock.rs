use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::convert::DocumentConverter;
use super::stamp::DocumentStamper;
use crate::error::{ConvertError, StampError};

/// Test double for the conversion collaborator. Copies bytes through and
/// records every call; specific source file names can be scripted to fail
/// with each boundary error.
#[derive(Default)]
pub struct MockConverter {
    calls: Mutex<Vec<PathBuf>>,
    unknown_format: Vec<String>,
    password_locked: Vec<String>,
    broken: Vec<String>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unknown_format_for(mut self, name: &str) -> Self {
        self.unknown_format.push(name.to_string());
        self
    }

    pub fn password_locked_for(mut self, name: &str) -> Self {
        self.password_locked.push(name.to_string());
        self
    }

    pub fn failing_for(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    fn matches(list: &[String], source: &Path) -> bool {
        source
            .file_name()
            .map(|n| list.iter().any(|item| n == item.as_str()))
            .unwrap_or(false)
    }
}

impl DocumentConverter for MockConverter {
    fn convert(&self, source: &Path, dest: &Path) -> Result<(), ConvertError> {
        self.calls.lock().unwrap().push(source.to_path_buf());

        if Self::matches(&self.unknown_format, source) {
            return Err(ConvertError::UnknownFormat {
                extension: "mock".to_string(),
            });
        }
        if Self::matches(&self.password_locked, source) {
            return Err(ConvertError::PasswordLocked);
        }
        if Self::matches(&self.broken, source) {
            return Err(ConvertError::Renderer("scripted failure".to_string()));
        }

        std::fs::copy(source, dest)?;
        Ok(())
    }
}

/// Test double for the stamping collaborator. Appends a marker so stamped
/// output is distinguishable from a raw copy.
#[derive(Default)]
pub struct MockStamper {
    calls: Mutex<Vec<PathBuf>>,
    broken: Vec<String>,
}

impl MockStamper {
    pub const MARKER: &'static [u8] = b"\n%stamped";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocumentStamper for MockStamper {
    fn stamp(&self, source: &Path, dest: &Path) -> Result<(), StampError> {
        self.calls.lock().unwrap().push(source.to_path_buf());

        let stem_matches = source
            .file_name()
            .map(|n| self.broken.iter().any(|item| n == item.as_str()))
            .unwrap_or(false);
        if stem_matches {
            return Err(StampError::Tool("scripted failure".to_string()));
        }

        let mut bytes = std::fs::read(source)?;
        bytes.extend_from_slice(Self::MARKER);
        std::fs::write(dest, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_converter_copies_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.tif");
        let dest = dir.path().join("a.pdf");
        std::fs::write(&source, b"bytes").unwrap();

        let converter = MockConverter::new();
        converter.convert(&source, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"bytes");
        assert_eq!(converter.calls(), vec![source]);
    }

    #[test]
    fn test_scripted_failures() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("locked.pdf");
        std::fs::write(&source, b"x").unwrap();

        let converter = MockConverter::new().password_locked_for("locked.pdf");
        let err = converter
            .convert(&source, &dir.path().join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::PasswordLocked));
    }

    #[test]
    fn test_mock_stamper_marks_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.pdf");
        let dest = dir.path().join("stamped.pdf");
        std::fs::write(&source, b"%PDF").unwrap();

        MockStamper::new().stamp(&source, &dest).unwrap();
        let out = std::fs::read(&dest).unwrap();
        assert!(out.ends_with(MockStamper::MARKER));
    }
}
