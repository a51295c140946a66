//! Operation notifier that reports progress through tracing output.

use roster_application::{DirectoryOperation, OperationNotifier, UserAdminError};
use tracing::{info, warn};

/// Notification surface for terminal front ends and headless runs.
#[derive(Debug, Clone, Default)]
pub struct TracingOperationNotifier;

impl TracingOperationNotifier {
    /// Creates a new tracing notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OperationNotifier for TracingOperationNotifier {
    fn started(&self, operation: &DirectoryOperation) {
        info!(
            operation = %operation,
            user_id = operation.user_id().map(|user_id| user_id.as_str()),
            "{}",
            operation.progress_message()
        );
    }

    fn succeeded(&self, operation: &DirectoryOperation) {
        info!(
            operation = %operation,
            user_id = operation.user_id().map(|user_id| user_id.as_str()),
            "{}",
            operation.success_message()
        );
    }

    fn failed(&self, operation: &DirectoryOperation, error: &UserAdminError) {
        warn!(
            operation = %operation,
            user_id = operation.user_id().map(|user_id| user_id.as_str()),
            error = %error,
            "{}",
            operation.failure_message()
        );
    }
}
