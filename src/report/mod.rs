mod writer;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{DocStampError, Result};

pub const MISSING_FILES_REPORT: &str = "missing-files.csv";
pub const MISSING_CONTENT_REPORT: &str = "missing-content.csv";
pub const MODIFIED_FILES_REPORT: &str = "modified-files.csv";
pub const UNKNOWN_FILE_TYPES_REPORT: &str = "unknown-file-types.csv";
pub const PASSWORD_LOCKED_REPORT: &str = "password-locked.csv";
pub const SUCCESS_REPORT: &str = "success.csv";

/// Audit entry for a resolution that went through the fuzzy fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedFileEntry {
    pub key: String,
    pub matched_via: String,
    pub matched_path: PathBuf,
}

/// Entry for a record whose resolved file could not be converted because of
/// its format or protection, keyed for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub key: String,
    pub path: PathBuf,
}

/// Thread-safe, category-partitioned accumulation of run outcomes. Appends
/// are mutex-guarded per category; the single flush happens after all workers
/// have joined and writes one CSV artifact per category, header-only when the
/// category is empty.
pub struct ReportAggregator {
    reports_dir: PathBuf,
    missing_files: Mutex<Vec<String>>,
    missing_content: Mutex<Vec<Vec<String>>>,
    modified_files: Mutex<Vec<ModifiedFileEntry>>,
    unknown_file_types: Mutex<Vec<FileEntry>>,
    password_locked: Mutex<Vec<FileEntry>>,
    successes: Mutex<Vec<Vec<String>>>,
    flushed: AtomicBool,
}

impl ReportAggregator {
    pub fn new(reports_dir: PathBuf) -> Self {
        Self {
            reports_dir,
            missing_files: Mutex::new(Vec::new()),
            missing_content: Mutex::new(Vec::new()),
            modified_files: Mutex::new(Vec::new()),
            unknown_file_types: Mutex::new(Vec::new()),
            password_locked: Mutex::new(Vec::new()),
            successes: Mutex::new(Vec::new()),
            flushed: AtomicBool::new(false),
        }
    }

    pub fn report_missing_file(&self, key: &str) {
        warn!(key, "file missing from source pool");
        self.lock(&self.missing_files).push(key.to_string());
    }

    pub fn report_missing_content(&self, fields: &[String]) {
        warn!(key = fields[0].as_str(), "record missing content needed for index");
        self.lock(&self.missing_content).push(fields.to_vec());
    }

    pub fn report_modified_file(&self, entry: ModifiedFileEntry) {
        warn!(
            key = entry.key.as_str(),
            matched = %entry.matched_path.display(),
            "fuzzy resolution recorded for audit"
        );
        self.lock(&self.modified_files).push(entry);
    }

    pub fn report_unknown_file_type(&self, entry: FileEntry) {
        warn!(key = entry.key.as_str(), "unrecognized file type");
        self.lock(&self.unknown_file_types).push(entry);
    }

    pub fn report_password_locked(&self, entry: FileEntry) {
        warn!(key = entry.key.as_str(), "password protected document");
        self.lock(&self.password_locked).push(entry);
    }

    pub fn report_success(&self, fields: &[String]) {
        self.lock(&self.successes).push(fields.to_vec());
    }

    pub fn missing_file_count(&self) -> usize {
        self.lock(&self.missing_files).len()
    }

    pub fn missing_content_count(&self) -> usize {
        self.lock(&self.missing_content).len()
    }

    pub fn modified_file_count(&self) -> usize {
        self.lock(&self.modified_files).len()
    }

    pub fn unknown_file_type_count(&self) -> usize {
        self.lock(&self.unknown_file_types).len()
    }

    pub fn password_locked_count(&self) -> usize {
        self.lock(&self.password_locked).len()
    }

    pub fn success_count(&self) -> usize {
        self.lock(&self.successes).len()
    }

    /// Writes every category artifact. Single-threaded by contract: called
    /// once after the dispatcher's completion barrier clears. A second call
    /// is rejected.
    pub fn flush(&self) -> Result<Vec<PathBuf>> {
        if self.flushed.swap(true, Ordering::SeqCst) {
            return Err(DocStampError::Report(
                "reports already flushed for this run".to_string(),
            ));
        }

        let mut artifacts = Vec::new();

        artifacts.push(writer::write_category(
            &self.reports_dir,
            MISSING_FILES_REPORT,
            "key",
            &self.lock(&self.missing_files).clone(),
        )?);

        let missing_content: Vec<String> = self
            .lock(&self.missing_content)
            .iter()
            .map(|fields| fields.join(","))
            .collect();
        artifacts.push(writer::write_category(
            &self.reports_dir,
            MISSING_CONTENT_REPORT,
            "key,fields",
            &missing_content,
        )?);

        let modified: Vec<String> = self
            .lock(&self.modified_files)
            .iter()
            .map(|e| format!("{},{},{}", e.key, e.matched_via, e.matched_path.display()))
            .collect();
        artifacts.push(writer::write_category(
            &self.reports_dir,
            MODIFIED_FILES_REPORT,
            "key,matched_via,matched_path",
            &modified,
        )?);

        let unknown: Vec<String> = self
            .lock(&self.unknown_file_types)
            .iter()
            .map(|e| format!("{},{}", e.key, e.path.display()))
            .collect();
        artifacts.push(writer::write_category(
            &self.reports_dir,
            UNKNOWN_FILE_TYPES_REPORT,
            "key,path",
            &unknown,
        )?);

        let locked: Vec<String> = self
            .lock(&self.password_locked)
            .iter()
            .map(|e| format!("{},{}", e.key, e.path.display()))
            .collect();
        artifacts.push(writer::write_category(
            &self.reports_dir,
            PASSWORD_LOCKED_REPORT,
            "key,path",
            &locked,
        )?);

        let successes: Vec<String> = self
            .lock(&self.successes)
            .iter()
            .map(|fields| fields.join(","))
            .collect();
        artifacts.push(writer::write_category(
            &self.reports_dir,
            SUCCESS_REPORT,
            "key,fields",
            &successes,
        )?);

        Ok(artifacts)
    }

    fn lock<'a, T>(&self, collection: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}
