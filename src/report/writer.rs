use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DocStampError, Result};

/// Writes one category artifact: a fixed header row, then one row per entry.
/// Rows are emitted as-is; fields containing the delimiter are an input
/// contract violation, not something this layer escapes.
pub(crate) fn write_category(
    dir: &Path,
    filename: &str,
    header: &str,
    rows: &[String],
) -> Result<PathBuf> {
    let path = dir.join(filename);
    let mut file = std::fs::File::create(&path).map_err(|e| {
        DocStampError::Report(format!("cannot create {}: {e}", path.display()))
    })?;

    writeln!(file, "{header}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;

    Ok(path)
}
