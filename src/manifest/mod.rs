use std::path::Path;

use serde::Serialize;

use crate::error::{DocStampError, Result};

/// Minimum total field count (key + 2 metadata fields) for a record to be
/// archivable. Records below this, or with any empty field, are quarantined.
pub const MIN_FIELD_COUNT: usize = 3;

/// One manifest line: an ordered, immutable sequence of string fields.
/// Field 0 is the lookup key; fields 1..n are free-form metadata carried
/// verbatim into the sidecar index and the success report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<String> = line.split(',').map(str::to_string).collect();
        if fields.is_empty() || fields[0].is_empty() {
            return Err(DocStampError::Manifest(format!(
                "record has no lookup key: {line:?}"
            )));
        }
        Ok(Self { fields })
    }

    pub fn key(&self) -> &str {
        &self.fields[0]
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Metadata fields 1..n, in original order.
    pub fn metadata(&self) -> &[String] {
        &self.fields[1..]
    }

    pub fn is_complete(&self) -> bool {
        self.fields.len() >= MIN_FIELD_COUNT && self.fields.iter().all(|f| !f.is_empty())
    }
}

/// Loads the manifest driving one run. Blank lines are skipped; any
/// unparseable line aborts the load (fatal, before dispatch).
pub fn load_manifest(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DocStampError::Manifest(format!("cannot read {}: {e}", path.display()))
    })?;

    let mut records = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        records.push(Record::parse(line)?);
    }

    if records.is_empty() {
        return Err(DocStampError::Manifest(format!(
            "{} contains no records",
            path.display()
        )));
    }

    Ok(records)
}
