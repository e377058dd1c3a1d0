//! Notification boundary for transient user feedback.
//!
//! Toast rendering is an external collaborator; the engine only emits
//! success/failure signals through this trait.

use tracing::{info, warn};

/// Sink for transient user-facing feedback.
pub trait Notifier: Send + Sync {
    /// A user action completed successfully.
    fn success(&self, message: &str);

    /// A user action failed, or requires sign-in.
    fn error(&self, message: &str);
}

/// Default notifier that forwards feedback to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(message, "user notification");
    }

    fn error(&self, message: &str) {
        warn!(message, "user notification");
    }
}
