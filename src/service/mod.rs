pub mod alert;
pub mod matcher;
pub mod notifier;
pub mod refresh;
pub mod scheduler;

pub use alert::{AlertJob, AlertReport};
pub use notifier::{ConsoleNotifier, Notifier};
pub use refresh::{RefreshJob, RefreshStats};
pub use scheduler::Scheduler;
