//! Application services and ports.

#![forbid(unsafe_code)]

mod dashboard_service;
mod directory_ports;
mod directory_store;
mod edit_session;
mod expansion_tracker;
mod in_flight;
mod user_admin_error;
mod user_admin_service;

pub use dashboard_service::{DashboardService, DirectorySummary};
pub use directory_ports::{
    DELETE_CONFIRMATION_PROMPT, DeleteConfirmation, DirectoryOperation, OperationNotifier,
    UserDirectoryApi,
};
pub use directory_store::DirectoryStore;
pub use edit_session::{EditSession, EditState};
pub use expansion_tracker::ExpansionTracker;
pub use in_flight::{InFlightRequests, RequestKind, RequestTicket};
pub use user_admin_error::UserAdminError;
pub use user_admin_service::{
    DeleteOutcome, DirectoryRow, DirectoryView, SaveOutcome, UserAdminService,
};
