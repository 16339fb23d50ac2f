use std::path::PathBuf;

use super::layout::RunLayout;
use crate::doc::{DocumentConverter, DocumentStamper};
use crate::error::Result;
use crate::index::FileIndex;
use crate::progress::ProgressTracker;
use crate::report::ReportAggregator;

/// Everything one run shares across its workers: the output layout, the
/// lazily-built file index, the report collections, the progress counter and
/// the two document collaborators. Constructed once per run and passed by
/// reference; there is no ambient global state.
pub struct RunContext {
    pub layout: RunLayout,
    pub index: FileIndex,
    pub reports: ReportAggregator,
    pub progress: ProgressTracker,
    pub converter: Box<dyn DocumentConverter>,
    pub stamper: Box<dyn DocumentStamper>,
}

impl RunContext {
    pub fn new(
        layout: RunLayout,
        source_dir: PathBuf,
        converter: Box<dyn DocumentConverter>,
        stamper: Box<dyn DocumentStamper>,
        total_records: usize,
    ) -> Result<Self> {
        layout.ensure()?;
        let reports = ReportAggregator::new(layout.reports_dir());
        Ok(Self {
            layout,
            index: FileIndex::new(source_dir),
            reports,
            progress: ProgressTracker::new(total_records),
            converter,
            stamper,
        })
    }
}
