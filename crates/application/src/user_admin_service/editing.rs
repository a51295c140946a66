use roster_domain::{FieldUpdate, UserId};
use tracing::{debug, info, warn};

use crate::{DirectoryOperation, EditState, RequestKind, UserAdminError};

use super::{SaveOutcome, UserAdminService};

impl UserAdminService {
    /// Opens an edit session on a stored record.
    ///
    /// Any unsaved scratch of another record is dropped without asking; the
    /// dropped target is returned.
    pub async fn begin_edit(&self, user_id: &UserId) -> Result<Option<UserId>, UserAdminError> {
        let mut state = self.state.lock().await;
        let record = state
            .store
            .record(user_id)
            .cloned()
            .ok_or_else(|| UserAdminError::NotFound {
                user_id: user_id.clone(),
            })?;

        state.session.begin(&record)
    }

    /// Replaces one field of the scratch. The store is not touched.
    pub async fn update_field(&self, update: FieldUpdate) -> Result<(), UserAdminError> {
        let mut state = self.state.lock().await;
        debug!(field = update.field_name(), "updating edit scratch");
        state.session.update_field(update)
    }

    /// Discards the scratch without saving.
    pub async fn cancel_edit(&self) -> Result<Option<UserId>, UserAdminError> {
        self.state.lock().await.session.cancel()
    }

    /// Sends the scratch to the backend and commits it once confirmed.
    ///
    /// On failure the session returns to editing with the scratch intact and
    /// the store is unchanged, unless a reload dropped the record meanwhile;
    /// then the session is closed.
    pub async fn save(&self) -> Result<SaveOutcome, UserAdminError> {
        let (user_id, scratch, ticket) = {
            let mut state = self.state.lock().await;
            let user_id = match state.session.state() {
                EditState::Editing { user_id, .. } => user_id.clone(),
                other => {
                    return Err(UserAdminError::InvalidState {
                        operation: "save",
                        state: other.name(),
                    });
                }
            };

            if state.in_flight.latest_kind(&user_id) == Some(RequestKind::Delete) {
                return Err(UserAdminError::RequestInFlight {
                    user_id,
                    kind: RequestKind::Delete,
                });
            }

            let ticket = state.in_flight.issue(&user_id, RequestKind::Save);
            match state.session.start_save(ticket) {
                Ok((user_id, scratch)) => (user_id, scratch, ticket),
                Err(error) => {
                    state.in_flight.settle(&user_id, ticket);
                    return Err(error);
                }
            }
        };

        let operation = DirectoryOperation::Save(user_id.clone());
        self.notifier.started(&operation);
        let response = self.api.update_user(&user_id, &scratch).await;

        let mut state = self.state.lock().await;
        let latest = state.in_flight.settle(&user_id, ticket);
        match response {
            Ok(()) => {
                state.session.finish_save(ticket, true);
                if !state.store.apply_edit(&user_id, &scratch) {
                    debug!(
                        user_id = %user_id,
                        latest,
                        "ignoring save response for user no longer in the directory"
                    );
                    self.notifier.succeeded(&operation);
                    return Ok(SaveOutcome::RecordGone);
                }

                info!(user_id = %user_id, "user changes saved");
                self.notifier.succeeded(&operation);
                Ok(SaveOutcome::Applied)
            }
            Err(source) => {
                if state.store.contains(&user_id) {
                    state.session.finish_save(ticket, false);
                } else if state.session.discard_for(&user_id) {
                    info!(
                        user_id = %user_id,
                        "closing edit session for user missing from the directory"
                    );
                }
                let error = UserAdminError::SaveFailed {
                    user_id: user_id.clone(),
                    source,
                };
                warn!(user_id = %user_id, error = %error, "saving user changes failed");
                self.notifier.failed(&operation, &error);
                Err(error)
            }
        }
    }
}
