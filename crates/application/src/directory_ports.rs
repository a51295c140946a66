//! Ports the user administration controller depends on.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use roster_core::AppResult;
use roster_domain::{EditableFields, UserId, UserRecord};

use crate::UserAdminError;

/// Question put to the administrator before an account is deleted.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this user?";

/// Remote user directory backend.
#[async_trait]
pub trait UserDirectoryApi: Send + Sync {
    /// Fetches every account, in backend order.
    async fn list_users(&self) -> AppResult<Vec<UserRecord>>;

    /// Deletes one account.
    async fn delete_user(&self, user_id: &UserId) -> AppResult<()>;

    /// Replaces the editable fields of one account.
    async fn update_user(&self, user_id: &UserId, fields: &EditableFields) -> AppResult<()>;
}

/// Yes/no gate shown before any delete request is sent.
#[async_trait]
pub trait DeleteConfirmation: Send + Sync {
    /// Returns `true` only when the administrator explicitly agreed.
    async fn confirm_delete(&self, user: &UserRecord) -> bool;
}

/// Remote operation reported to the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOperation {
    /// Fetching the whole directory.
    Load,
    /// Fetching the directory for the dashboard totals.
    Dashboard,
    /// Saving edited fields of one account.
    Save(UserId),
    /// Deleting one account.
    Delete(UserId),
}

impl DirectoryOperation {
    /// Message shown while the operation is in flight.
    #[must_use]
    pub fn progress_message(&self) -> &'static str {
        match self {
            Self::Load | Self::Dashboard => "Fetching details, please wait...",
            Self::Save(_) => "Saving changes, please wait...",
            Self::Delete(_) => "Deleting user, please wait...",
        }
    }

    /// Message shown when the operation succeeded.
    #[must_use]
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Load | Self::Dashboard => "Data fetched successfully!",
            Self::Save(_) => "Changes saved successfully!",
            Self::Delete(_) => "User deleted successfully!",
        }
    }

    /// Message shown when the operation failed.
    #[must_use]
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Load => "Error in fetching details.",
            Self::Dashboard => "Failed to fetch user details.",
            Self::Save(_) => "Error in saving changes.",
            Self::Delete(_) => "Error in deleting user.",
        }
    }

    /// Returns the targeted account, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Load | Self::Dashboard => None,
            Self::Save(user_id) | Self::Delete(user_id) => Some(user_id),
        }
    }
}

impl Display for DirectoryOperation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => formatter.write_str("load users"),
            Self::Dashboard => formatter.write_str("load dashboard"),
            Self::Save(user_id) => write!(formatter, "save user {user_id}"),
            Self::Delete(user_id) => write!(formatter, "delete user {user_id}"),
        }
    }
}

/// Notification surface for remote operation progress.
pub trait OperationNotifier: Send + Sync {
    /// A request was issued.
    fn started(&self, operation: &DirectoryOperation);

    /// The request completed and local state was updated.
    fn succeeded(&self, operation: &DirectoryOperation);

    /// The request failed; local state was rolled back.
    fn failed(&self, operation: &DirectoryOperation, error: &UserAdminError);
}
