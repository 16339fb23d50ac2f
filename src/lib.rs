pub mod doc;
pub mod error;
pub mod index;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use error::{ConvertError, DocStampError, Result, StampError};
pub use manifest::{load_manifest, Record, MIN_FIELD_COUNT};
pub use index::{FileIndex, FileSnapshot, IndexedFile, Resolution, KEY_SEPARATOR};
pub use report::{FileEntry, ModifiedFileEntry, ReportAggregator};
pub use progress::ProgressTracker;
pub use doc::{
    DocumentConverter, DocumentStamper, MockConverter, MockStamper, OverlayStamper,
    StandardConverter, ToolCommand,
};
pub use pipeline::{
    Disposition, RecordFailure, RecordOutcome, RecordProcessor, RunContext, RunLayout, RunReport,
    WorkDispatcher,
};
