use std::sync::atomic::{AtomicUsize, Ordering};

/// Completed-vs-total accounting for one run. Observability only: the counter
/// never gates any work. Monotonically non-decreasing under arbitrary
/// concurrent callers; `completed` reaches exactly `total` at run end.
#[derive(Debug)]
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Records one completed unit and returns the new completed count.
    pub fn report(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Forces the counter to exactly `total`. Used once, after the dispatcher
    /// barrier clears. Never moves the counter backwards.
    pub fn force_complete(&self) {
        self.completed.fetch_max(self.total, Ordering::SeqCst);
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed() as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_report_increments_by_one() {
        let tracker = ProgressTracker::new(3);
        assert_eq!(tracker.report(), 1);
        assert_eq!(tracker.report(), 2);
        assert_eq!(tracker.completed(), 2);
        assert!(!tracker.is_complete());
    }

    #[test]
    fn test_force_complete_pins_to_total() {
        let tracker = ProgressTracker::new(5);
        tracker.report();
        tracker.force_complete();
        assert_eq!(tracker.completed(), 5);
        assert!((tracker.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_force_complete_never_decreases() {
        let tracker = ProgressTracker::new(2);
        tracker.report();
        tracker.report();
        tracker.force_complete();
        assert_eq!(tracker.completed(), 2);
    }

    #[test]
    fn test_empty_run_is_complete() {
        let tracker = ProgressTracker::new(0);
        assert!(tracker.is_complete());
        assert!((tracker.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_concurrent_reports_reach_exactly_total() {
        let tracker = Arc::new(ProgressTracker::new(64));
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || tracker.report())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tracker.completed(), 64);
        assert!(tracker.is_complete());
    }
}
