//! Directory totals for the administrator dashboard.

use std::sync::Arc;

use roster_domain::{AccountStatus, Role, UserRecord};
use tracing::warn;

use crate::{DirectoryOperation, OperationNotifier, UserAdminError, UserDirectoryApi};

/// Account totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySummary {
    /// Number of accounts in the directory.
    pub total: usize,
    /// Account count per role, in [`Role::all`] order.
    pub by_role: Vec<(Role, usize)>,
    /// Account count per status, in [`AccountStatus::all`] order.
    pub by_status: Vec<(AccountStatus, usize)>,
}

impl DirectorySummary {
    /// Counts the given records.
    #[must_use]
    pub fn from_records(records: &[UserRecord]) -> Self {
        let by_role = Role::all()
            .iter()
            .map(|role| {
                let count = records.iter().filter(|record| record.role() == *role).count();
                (*role, count)
            })
            .collect();
        let by_status = AccountStatus::all()
            .iter()
            .map(|status| {
                let count = records
                    .iter()
                    .filter(|record| record.status() == *status)
                    .count();
                (*status, count)
            })
            .collect();

        Self {
            total: records.len(),
            by_role,
            by_status,
        }
    }
}

/// Fetches dashboard figures straight from the backend.
#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn UserDirectoryApi>,
    notifier: Arc<dyn OperationNotifier>,
}

impl DashboardService {
    /// Creates a dashboard service.
    #[must_use]
    pub fn new(api: Arc<dyn UserDirectoryApi>, notifier: Arc<dyn OperationNotifier>) -> Self {
        Self { api, notifier }
    }

    /// Fetches the directory and summarises it.
    pub async fn summary(&self) -> Result<DirectorySummary, UserAdminError> {
        let operation = DirectoryOperation::Dashboard;
        self.notifier.started(&operation);

        match self.api.list_users().await {
            Ok(records) => {
                self.notifier.succeeded(&operation);
                Ok(DirectorySummary::from_records(records.as_slice()))
            }
            Err(source) => {
                let error = UserAdminError::LoadFailed { source };
                warn!(error = %error, "dashboard summary failed");
                self.notifier.failed(&operation, &error);
                Err(error)
            }
        }
    }
}
