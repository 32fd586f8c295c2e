use crate::service::alert::AlertReport;
use tracing::info;

/// Seam for delivering the per-cycle pollution alert. Presentation lives
/// behind this trait so the core never depends on any windowing surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, report: &AlertReport);
}

/// Default notifier: prints the combined alert to the console and records it
/// in the log.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, report: &AlertReport) {
        println!("\n*** Pollution alert ***");
        println!("{}\n", report.message());
        info!(
            warning = report.warning.len(),
            caution = report.caution.len(),
            "pollution alert raised"
        );
    }
}
