mod context;
mod dispatcher;
mod layout;
mod processor;

pub use context::RunContext;
pub use dispatcher::{RecordFailure, RunReport, WorkDispatcher};
pub use layout::{RunLayout, CANONICAL_EXTENSION, SIDECAR_EXTENSION};
pub use processor::{Disposition, RecordOutcome, RecordProcessor};
