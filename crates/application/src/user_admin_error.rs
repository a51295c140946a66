use roster_core::AppError;
use roster_domain::UserId;
use thiserror::Error;

use crate::RequestKind;

/// Failures surfaced by the user administration controller.
///
/// Every variant is recoverable: the controller keeps a consistent state and
/// the administrator may simply retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserAdminError {
    /// The directory could not be fetched. The previous collection is kept.
    #[error("failed to load users: {source}")]
    LoadFailed {
        /// Underlying transport or server error.
        source: AppError,
    },

    /// The backend rejected or never answered a delete. Nothing was removed.
    #[error("failed to delete user '{user_id}': {source}")]
    DeleteFailed {
        /// Account the delete targeted.
        user_id: UserId,
        /// Underlying transport or server error.
        source: AppError,
    },

    /// The backend rejected or never answered a save. The scratch is kept.
    #[error("failed to save user '{user_id}': {source}")]
    SaveFailed {
        /// Account the save targeted.
        user_id: UserId,
        /// Underlying transport or server error.
        source: AppError,
    },

    /// The edit session cannot perform the operation in its current state.
    #[error("cannot {operation} while the edit session is {state}")]
    InvalidState {
        /// Attempted operation.
        operation: &'static str,
        /// Current session state name.
        state: &'static str,
    },

    /// The account is not in the loaded directory.
    #[error("user '{user_id}' is not in the directory")]
    NotFound {
        /// Requested account.
        user_id: UserId,
    },

    /// A conflicting request for the same account has not resolved yet.
    #[error("a {kind} request for user '{user_id}' is still in flight")]
    RequestInFlight {
        /// Account the request targets.
        user_id: UserId,
        /// Pending request kind.
        kind: RequestKind,
    },
}
