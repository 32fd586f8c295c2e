//! Cooperative scheduling of the refresh + alert cycle.
//!
//! The console loop polls `is_due` once per iteration; a long-blocked prompt
//! simply delays the cycle until the loop comes back around. Refresh and
//! alert always run sequentially on the same task, so no two jobs can ever
//! overlap.

use crate::service::alert::AlertJob;
use crate::service::notifier::Notifier;
use crate::service::refresh::RefreshJob;
use std::time::{Duration, Instant};
use tracing::warn;

pub struct Scheduler {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// True until the first `mark_run`, then whenever the interval has
    /// elapsed since the last one. Nothing is persisted across restarts.
    pub fn is_due(&self) -> bool {
        match self.last_run {
            None => true,
            Some(at) => at.elapsed() >= self.interval,
        }
    }

    pub fn mark_run(&mut self) {
        self.last_run = Some(Instant::now());
    }
}

/// One scheduled cycle: refresh, then alert. A failed job logs and yields;
/// the next cycle retries from scratch, the process never goes down with it.
pub async fn run_cycle(refresh: &RefreshJob, alert: &AlertJob, notifier: &dyn Notifier) {
    if let Err(e) = refresh.run().await {
        warn!(error = %e, "refresh cycle failed; keeping previous readings");
    }

    match alert.run().await {
        Ok(report) if !report.is_empty() => notifier.notify(&report),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "alert evaluation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_immediately_after_construction() {
        let scheduler = Scheduler::new(Duration::from_secs(3600));
        assert!(scheduler.is_due());
    }

    #[test]
    fn not_due_right_after_a_run() {
        let mut scheduler = Scheduler::new(Duration::from_secs(3600));
        scheduler.mark_run();
        assert!(!scheduler.is_due());
    }

    #[test]
    fn due_again_once_the_interval_elapses() {
        let mut scheduler = Scheduler::new(Duration::ZERO);
        scheduler.mark_run();
        assert!(scheduler.is_due());
    }
}
