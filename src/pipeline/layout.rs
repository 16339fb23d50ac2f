use std::path::{Path, PathBuf};

use crate::error::{DocStampError, Result};

pub const CANONICAL_EXTENSION: &str = "pdf";
pub const SIDECAR_EXTENSION: &str = "csv";

const ORIGINALS_DIR: &str = "originals";
const ARCHIVE_DIR: &str = "archive";
const QUARANTINE_DIR: &str = "quarantine";
const REPORTS_DIR: &str = "reports";

/// Output directory tree for one run, rooted at a base directory. Replaces
/// the original interactive bootstrap: the caller supplies the base
/// explicitly and `ensure()` creates everything up front.
#[derive(Debug, Clone)]
pub struct RunLayout {
    base: PathBuf,
}

impl RunLayout {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn originals_dir(&self) -> PathBuf {
        self.base.join(ORIGINALS_DIR)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.base.join(ARCHIVE_DIR)
    }

    pub fn quarantine_dir(&self) -> PathBuf {
        self.base.join(QUARANTINE_DIR)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.base.join(REPORTS_DIR)
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [
            self.base.clone(),
            self.originals_dir(),
            self.archive_dir(),
            self.quarantine_dir(),
            self.reports_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                DocStampError::Layout(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Canonical intermediate artifact for a resolved file stem.
    pub fn converted_path(&self, stem: &str) -> PathBuf {
        self.originals_dir()
            .join(format!("{stem}.{CANONICAL_EXTENSION}"))
    }

    pub fn archive_path(&self, stem: &str) -> PathBuf {
        self.archive_dir()
            .join(format!("{stem}.{CANONICAL_EXTENSION}"))
    }

    /// Sidecar index beside the archived artifact, same stem.
    pub fn sidecar_path(&self, stem: &str) -> PathBuf {
        self.archive_dir().join(format!("{stem}.{SIDECAR_EXTENSION}"))
    }

    pub fn quarantine_path(&self, stem: &str) -> PathBuf {
        self.quarantine_dir()
            .join(format!("{stem}.{CANONICAL_EXTENSION}"))
    }
}
