use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::context::RunContext;
use crate::error::{ConvertError, DocStampError, Result};
use crate::index::Resolution;
use crate::manifest::Record;
use crate::report::{FileEntry, ModifiedFileEntry};

/// Terminal bucket a record landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Archived,
    Quarantined,
    Missing,
    UnknownFileType,
    PasswordLocked,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Archived => "archived",
            Disposition::Quarantined => "quarantined",
            Disposition::Missing => "missing",
            Disposition::UnknownFileType => "unknown_file_type",
            Disposition::PasswordLocked => "password_locked",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub key: String,
    pub disposition: Disposition,
}

/// Per-record state machine: resolve, convert, classify, then archive or
/// quarantine. Every path reaches a terminal state for exactly one record;
/// collaborator failures not covered by a report bucket surface as `Err` and
/// are collected by the dispatcher without touching the rest of the batch.
pub struct RecordProcessor<'a> {
    ctx: &'a RunContext,
}

impl<'a> RecordProcessor<'a> {
    pub fn new(ctx: &'a RunContext) -> Self {
        Self { ctx }
    }

    pub fn process(&self, record: &Record) -> Result<RecordOutcome> {
        let session = session_id();
        let key = record.key();
        debug!(session = session.as_str(), key, "resolving record");

        let resolved = match self.ctx.index.resolve(key)? {
            Resolution::NotFound => {
                self.ctx.reports.report_missing_file(key);
                debug!(session = session.as_str(), key, "no file resolved");
                return Ok(outcome(key, Disposition::Missing));
            }
            Resolution::Fuzzy { path, matched_via } => {
                self.ctx.reports.report_modified_file(ModifiedFileEntry {
                    key: key.to_string(),
                    matched_via,
                    matched_path: path.clone(),
                });
                path
            }
            Resolution::Exact(path) => path,
        };

        let stem = file_stem(&resolved);
        let converted = self.ctx.layout.converted_path(&stem);
        debug!(session = session.as_str(), key, source = %resolved.display(), "converting");
        if let Err(e) = self.ctx.converter.convert(&resolved, &converted) {
            return match e {
                ConvertError::UnknownFormat { .. } => {
                    self.ctx.reports.report_unknown_file_type(FileEntry {
                        key: key.to_string(),
                        path: resolved,
                    });
                    Ok(outcome(key, Disposition::UnknownFileType))
                }
                ConvertError::PasswordLocked => {
                    self.ctx.reports.report_password_locked(FileEntry {
                        key: key.to_string(),
                        path: resolved,
                    });
                    Ok(outcome(key, Disposition::PasswordLocked))
                }
                other => Err(DocStampError::Convert {
                    path: resolved,
                    source: other,
                }),
            };
        }

        if !record.is_complete() {
            let quarantined = self.ctx.layout.quarantine_path(&stem);
            // copy first: a storage failure here must stay a unit failure,
            // not also land the record in the missing-content bucket
            std::fs::copy(&converted, &quarantined)?;
            self.ctx.reports.report_missing_content(record.fields());
            debug!(session = session.as_str(), key, dest = %quarantined.display(), "quarantined");
            return Ok(outcome(key, Disposition::Quarantined));
        }

        let archived = self.ctx.layout.archive_path(&stem);
        self.ctx
            .stamper
            .stamp(&converted, &archived)
            .map_err(|e| DocStampError::Stamp {
                path: converted.clone(),
                source: e,
            })?;

        self.write_sidecar(&stem, record)?;
        self.ctx.reports.report_success(record.fields());
        debug!(session = session.as_str(), key, dest = %archived.display(), "archived");
        Ok(outcome(key, Disposition::Archived))
    }

    fn write_sidecar(&self, stem: &str, record: &Record) -> Result<()> {
        let path = self.ctx.layout.sidecar_path(stem);
        let write = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&path)?;
            writeln!(file, "{}", record.metadata().join(","))?;
            file.flush()
        };
        write().map_err(|e| DocStampError::Sidecar {
            path,
            detail: e.to_string(),
        })
    }
}

fn outcome(key: &str, disposition: Disposition) -> RecordOutcome {
    RecordOutcome {
        key: key.to_string(),
        disposition,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn session_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
