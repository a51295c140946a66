//! User administration controller.
//!
//! Owns the directory store, the expansion tracker, and the edit session of
//! one mounted view. State sits behind a mutex that is never held across a
//! backend call, so searching and expanding keep working while a load, save,
//! or delete is in flight. Local state only changes once the backend has
//! confirmed a change.

use std::sync::Arc;

use roster_domain::{EditableFields, UserId, UserRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    DeleteConfirmation, DirectoryOperation, DirectoryStore, DirectorySummary, EditSession,
    EditState, ExpansionTracker, InFlightRequests, OperationNotifier, UserAdminError,
    UserDirectoryApi,
};

mod deletion;
mod editing;


/// Result of a save whose request succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The confirmed fields were merged into the store.
    Applied,
    /// The record was removed while the save was in flight; nothing changed.
    RecordGone,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend deleted the account and the store dropped it.
    Deleted,
    /// The administrator declined; no request was sent.
    Declined,
}

/// One visible row of the directory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRow {
    /// 1-based position in the filtered view.
    pub position: usize,
    /// Stored record.
    pub record: UserRecord,
    /// Whether the details are shown.
    pub expanded: bool,
    /// Scratch fields when this record is in the edit session.
    pub editing: Option<EditableFields>,
    /// Whether an update for this record is pending.
    pub saving: bool,
}

/// Snapshot of everything a view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    /// Active search term.
    pub search_term: String,
    /// Number of loaded records, ignoring the search term.
    pub total: usize,
    /// Rows matching the search term.
    pub rows: Vec<DirectoryRow>,
}

#[derive(Debug, Default)]
struct ControllerState {
    store: DirectoryStore,
    expansion: ExpansionTracker,
    session: EditSession,
    in_flight: InFlightRequests,
    load_generation: u64,
}

/// Controller for listing, searching, editing, and deleting accounts.
#[derive(Clone)]
pub struct UserAdminService {
    api: Arc<dyn UserDirectoryApi>,
    notifier: Arc<dyn OperationNotifier>,
    confirmation: Arc<dyn DeleteConfirmation>,
    state: Arc<Mutex<ControllerState>>,
}

impl UserAdminService {
    /// Creates a controller with an empty directory.
    #[must_use]
    pub fn new(
        api: Arc<dyn UserDirectoryApi>,
        notifier: Arc<dyn OperationNotifier>,
        confirmation: Arc<dyn DeleteConfirmation>,
    ) -> Self {
        Self {
            api,
            notifier,
            confirmation,
            state: Arc::new(Mutex::new(ControllerState::default())),
        }
    }

    /// Fetches the directory and replaces the local collection.
    ///
    /// On failure the previous collection stays in place. A response that
    /// arrives after a newer load was issued is dropped. Returns the number
    /// of records held afterwards.
    pub async fn load(&self) -> Result<usize, UserAdminError> {
        let generation = {
            let mut state = self.state.lock().await;
            state.load_generation = state.load_generation.saturating_add(1);
            state.load_generation
        };

        let operation = DirectoryOperation::Load;
        self.notifier.started(&operation);
        let response = self.api.list_users().await;

        let mut state = self.state.lock().await;
        match response {
            Ok(records) => {
                if state.load_generation != generation {
                    debug!(generation, "dropping superseded directory listing");
                    self.notifier.succeeded(&operation);
                    return Ok(state.store.len());
                }

                let count = state.store.replace_all(records);
                state.forget_missing_targets();
                info!(count, "directory loaded");
                self.notifier.succeeded(&operation);
                Ok(count)
            }
            Err(source) => {
                let error = UserAdminError::LoadFailed { source };
                warn!(error = %error, "directory load failed");
                self.notifier.failed(&operation, &error);
                Err(error)
            }
        }
    }

    /// Updates the search filter without fetching.
    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.lock().await.store.set_search_term(term);
    }

    /// Returns the active search term.
    pub async fn search_term(&self) -> String {
        self.state.lock().await.store.search_term().to_owned()
    }

    /// Records matching the search term, in directory order.
    pub async fn visible_records(&self) -> Vec<UserRecord> {
        self.state
            .lock()
            .await
            .store
            .visible_records()
            .cloned()
            .collect()
    }

    /// Looks up one stored record.
    pub async fn record(&self, user_id: &UserId) -> Option<UserRecord> {
        self.state.lock().await.store.record(user_id).cloned()
    }

    /// Shows or hides the details of one record. Returns whether it is
    /// expanded afterwards.
    pub async fn toggle_details(&self, user_id: &UserId) -> Result<bool, UserAdminError> {
        let mut state = self.state.lock().await;
        if !state.store.contains(user_id) {
            return Err(UserAdminError::NotFound {
                user_id: user_id.clone(),
            });
        }

        Ok(state.expansion.toggle(user_id))
    }

    /// Returns the expanded record, if any.
    pub async fn expanded_id(&self) -> Option<UserId> {
        self.state.lock().await.expansion.expanded_id().cloned()
    }

    /// Returns a copy of the edit session state.
    pub async fn edit_state(&self) -> EditState {
        self.state.lock().await.session.state().clone()
    }

    /// Summarises the loaded directory without fetching.
    pub async fn summary(&self) -> DirectorySummary {
        DirectorySummary::from_records(self.state.lock().await.store.records())
    }

    /// Builds a render snapshot of the filtered directory.
    pub async fn view(&self) -> DirectoryView {
        let state = self.state.lock().await;
        let session_target = state.session.target();
        let rows = state
            .store
            .visible_records()
            .enumerate()
            .map(|(index, record)| {
                let in_session = session_target == Some(record.id());
                DirectoryRow {
                    position: index + 1,
                    record: record.clone(),
                    expanded: state.expansion.is_expanded(record.id()),
                    editing: in_session
                        .then(|| state.session.scratch().cloned())
                        .flatten(),
                    saving: in_session && state.session.is_saving(),
                }
            })
            .collect();

        DirectoryView {
            search_term: state.store.search_term().to_owned(),
            total: state.store.len(),
            rows,
        }
    }
}

impl ControllerState {
    /// Drops expansion and idle edits that point at records a reload removed.
    fn forget_missing_targets(&mut self) {
        if let Some(expanded) = self.expansion.expanded_id().cloned()
            && !self.store.contains(&expanded)
        {
            self.expansion.collapse_if(&expanded);
        }

        if let EditState::Editing { user_id, .. } = self.session.state()
            && !self.store.contains(user_id)
        {
            let user_id = user_id.clone();
            info!(user_id = %user_id, "discarding edit for user missing from reloaded directory");
            self.session.discard_for(&user_id);
        }
    }
}
