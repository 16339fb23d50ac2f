mod matcher;
mod snapshot;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing::debug;

use crate::error::Result;

pub use matcher::KEY_SEPARATOR;
pub use snapshot::{FileSnapshot, IndexedFile};

/// Outcome of resolving a manifest key against the source directory. A fuzzy
/// resolution always carries the key (full or derived prefix) that produced
/// the match, so the caller can file the audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Exact(PathBuf),
    Fuzzy { path: PathBuf, matched_via: String },
    NotFound,
}

/// Lazily-built, run-scoped index over the source directory. The first caller
/// builds the snapshot under a lock; every later call reads the immutable
/// handle without locking. Never refreshed mid-run.
pub struct FileIndex {
    root: PathBuf,
    snapshot: OnceLock<FileSnapshot>,
    build_guard: Mutex<()>,
}

impl FileIndex {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            snapshot: OnceLock::new(),
            build_guard: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Forces the one-time snapshot build. Exactly one builder runs even when
    /// callers race; a listing failure here is fatal to the run.
    pub fn prime(&self) -> Result<&FileSnapshot> {
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(snapshot);
        }
        let _guard = self
            .build_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(snapshot);
        }
        let built = FileSnapshot::build(&self.root)?;
        debug!(files = built.len(), root = %self.root.display(), "file index built");
        Ok(self.snapshot.get_or_init(|| built))
    }

    /// Resolves a key through the ordered matcher list: exact, substring,
    /// then prefix-before-separator. First hit wins.
    pub fn resolve(&self, key: &str) -> Result<Resolution> {
        let snapshot = self.prime()?;

        if let Some(file) = matcher::exact(snapshot, key) {
            return Ok(Resolution::Exact(file.path.clone()));
        }
        if let Some(file) = matcher::substring(snapshot, key) {
            return Ok(Resolution::Fuzzy {
                path: file.path.clone(),
                matched_via: key.to_string(),
            });
        }
        if let Some((file, via)) = matcher::prefix(snapshot, key) {
            return Ok(Resolution::Fuzzy {
                path: file.path.clone(),
                matched_via: via.to_string(),
            });
        }
        Ok(Resolution::NotFound)
    }
}
