use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::context::RunContext;
use super::processor::{Disposition, RecordOutcome, RecordProcessor};
use crate::error::{DocStampError, Result};
use crate::manifest::Record;

/// A unit that failed outside the report buckets (converter/stamper/storage
/// failure scoped to one record). Collected, never fatal to the batch.
#[derive(Debug, Clone, Serialize)]
pub struct RecordFailure {
    pub key: String,
    pub error: String,
}

/// Consolidated result of one run: per-record dispositions, collected unit
/// failures, report artifacts and timing.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub outcomes: Vec<RecordOutcome>,
    pub failures: Vec<RecordFailure>,
    pub artifacts: Vec<PathBuf>,
}

impl RunReport {
    fn count(&self, disposition: Disposition) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.disposition == disposition)
            .count()
    }

    pub fn archived_count(&self) -> usize {
        self.count(Disposition::Archived)
    }

    pub fn quarantined_count(&self) -> usize {
        self.count(Disposition::Quarantined)
    }

    pub fn missing_count(&self) -> usize {
        self.count(Disposition::Missing)
    }

    pub fn unknown_file_type_count(&self) -> usize {
        self.count(Disposition::UnknownFileType)
    }

    pub fn password_locked_count(&self) -> usize {
        self.count(Disposition::PasswordLocked)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Fans the manifest out across a bounded worker pool, one blocking
/// RecordProcessor invocation per record, and blocks the caller until every
/// unit reaches a terminal state. Unit failures are collected, progress is
/// reported once per unit, and the single report flush runs after the join.
pub struct WorkDispatcher {
    workers: usize,
}

impl WorkDispatcher {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn dispatch(&self, ctx: Arc<RunContext>, records: Vec<Record>) -> Result<RunReport> {
        // a listing failure aborts here, before any unit is submitted
        ctx.index.prime()?;

        let started_at = Utc::now();
        let total = records.len();
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut units: JoinSet<(String, Result<RecordOutcome>)> = JoinSet::new();

        info!(total, workers = self.workers, "dispatching manifest");
        for record in records {
            let ctx = Arc::clone(&ctx);
            let semaphore = Arc::clone(&semaphore);
            units.spawn(async move {
                let key = record.key().to_string();
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return (key, Err(DocStampError::Dispatch(e.to_string()))),
                };

                let worker_ctx = Arc::clone(&ctx);
                let joined =
                    tokio::task::spawn_blocking(move || {
                        RecordProcessor::new(&worker_ctx).process(&record)
                    })
                    .await;
                let result = match joined {
                    Ok(result) => result,
                    Err(e) => Err(DocStampError::Dispatch(format!("worker panicked: {e}"))),
                };

                let completed = ctx.progress.report();
                debug!(completed, total, "unit complete");
                (key, result)
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        let mut failures = Vec::new();
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((_, Ok(outcome))) => outcomes.push(outcome),
                Ok((key, Err(e))) => failures.push(RecordFailure {
                    key,
                    error: e.to_string(),
                }),
                Err(e) => failures.push(RecordFailure {
                    key: "<unknown>".to_string(),
                    error: format!("unit lost: {e}"),
                }),
            }
        }

        ctx.progress.force_complete();
        info!(
            completed = ctx.progress.completed(),
            total,
            "all units complete"
        );

        let artifacts = ctx.reports.flush()?;
        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            total,
            outcomes,
            failures,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MockConverter, MockStamper};
    use crate::pipeline::layout::RunLayout;

    fn run_context(dir: &tempfile::TempDir, converter: MockConverter, total: usize) -> RunContext {
        let source = dir.path().join("pool");
        std::fs::create_dir_all(&source).unwrap();
        RunContext::new(
            RunLayout::new(dir.path().join("run")),
            source,
            Box::new(converter),
            Box::new(MockStamper::new()),
            total,
        )
        .unwrap()
    }

    fn seed(dir: &tempfile::TempDir, name: &str) {
        std::fs::write(dir.path().join("pool").join(name), b"%PDF-1.4 body").unwrap();
    }

    fn records(lines: &[&str]) -> Vec<Record> {
        lines.iter().map(|l| Record::parse(l).unwrap()).collect()
    }

    #[test]
    fn test_progress_reaches_total_despite_failures() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = run_context(&dir, MockConverter::new().failing_for("B1.pdf"), 3);
        seed(&dir, "A1.pdf");
        seed(&dir, "B1.pdf");

        let manifest = records(&[
            "A1,Loan,2020-01-01",
            "B1,Loan,2020-01-02",
            "MISSING,Loan,2020-01-03",
        ]);

        let ctx = Arc::new(ctx);
        let report = tokio_test::block_on(
            WorkDispatcher::new(2).dispatch(Arc::clone(&ctx), manifest),
        )
        .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.archived_count(), 1);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].key, "B1");
        assert!(ctx.progress.is_complete());
        assert_eq!(ctx.progress.completed(), 3);
    }

    #[test]
    fn test_stamper_failure_is_collected_and_progress_still_completes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("pool");
        std::fs::create_dir_all(&source).unwrap();
        // the stamper sees the converted artifact, named by the resolved stem
        let ctx = Arc::new(
            RunContext::new(
                RunLayout::new(dir.path().join("run")),
                source,
                Box::new(MockConverter::new()),
                Box::new(MockStamper::new().failing_for("B1.pdf")),
                2,
            )
            .unwrap(),
        );
        seed(&dir, "A1.pdf");
        seed(&dir, "B1.pdf");

        let manifest = records(&["A1,Loan,2020-01-01", "B1,Loan,2020-01-02"]);
        let report = tokio_test::block_on(
            WorkDispatcher::new(2).dispatch(Arc::clone(&ctx), manifest),
        )
        .unwrap();

        assert_eq!(report.archived_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].key, "B1");
        assert_eq!(ctx.reports.success_count(), 1);
        assert_eq!(ctx.progress.completed(), 2);
    }

    #[test]
    fn test_flush_runs_after_join() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Arc::new(run_context(&dir, MockConverter::new(), 1));
        seed(&dir, "A1.pdf");

        let report = tokio_test::block_on(
            WorkDispatcher::new(4).dispatch(Arc::clone(&ctx), records(&["A1,Loan,2020-01-01"])),
        )
        .unwrap();

        assert_eq!(report.artifacts.len(), 6);
        // the dispatcher owns the single flush
        assert!(ctx.reports.flush().is_err());
    }

    #[test]
    fn test_missing_source_directory_aborts_before_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(dir.path().join("run"));
        let ctx = Arc::new(
            RunContext::new(
                layout,
                dir.path().join("absent-pool"),
                Box::new(MockConverter::new()),
                Box::new(MockStamper::new()),
                1,
            )
            .unwrap(),
        );

        let result = tokio_test::block_on(
            WorkDispatcher::new(2).dispatch(Arc::clone(&ctx), records(&["A1,Loan,2020-01-01"])),
        );
        assert!(result.is_err());
        assert_eq!(ctx.progress.completed(), 0);
    }

    #[test]
    fn test_worker_floor_is_one() {
        assert_eq!(WorkDispatcher::new(0).workers(), 1);
    }
}
