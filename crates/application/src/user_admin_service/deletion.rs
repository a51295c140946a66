use roster_domain::UserId;
use tracing::{info, warn};

use crate::{DirectoryOperation, InFlightRequests, RequestKind, UserAdminError};

use super::{DeleteOutcome, UserAdminService};

impl UserAdminService {
    /// Deletes an account after explicit confirmation.
    ///
    /// Nothing is sent unless the confirmation port answers yes. Once the
    /// backend confirms, the record leaves the store and any expansion or
    /// edit session pointing at it is reset.
    pub async fn request_delete(&self, user_id: &UserId) -> Result<DeleteOutcome, UserAdminError> {
        let record = {
            let state = self.state.lock().await;
            ensure_no_pending_delete(&state.in_flight, user_id)?;
            state
                .store
                .record(user_id)
                .cloned()
                .ok_or_else(|| UserAdminError::NotFound {
                    user_id: user_id.clone(),
                })?
        };

        if !self.confirmation.confirm_delete(&record).await {
            info!(user_id = %user_id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let ticket = {
            let mut state = self.state.lock().await;
            ensure_no_pending_delete(&state.in_flight, user_id)?;
            if !state.store.contains(user_id) {
                return Err(UserAdminError::NotFound {
                    user_id: user_id.clone(),
                });
            }
            state.in_flight.issue(user_id, RequestKind::Delete)
        };

        let operation = DirectoryOperation::Delete(user_id.clone());
        self.notifier.started(&operation);
        let response = self.api.delete_user(user_id).await;

        let mut state = self.state.lock().await;
        state.in_flight.settle(user_id, ticket);
        match response {
            Ok(()) => {
                state.store.remove_record(user_id);
                if state.session.discard_for(user_id) {
                    info!(user_id = %user_id, "edit session closed for deleted user");
                }
                state.expansion.collapse_if(user_id);
                info!(user_id = %user_id, "user deleted");
                self.notifier.succeeded(&operation);
                Ok(DeleteOutcome::Deleted)
            }
            Err(source) => {
                let error = UserAdminError::DeleteFailed {
                    user_id: user_id.clone(),
                    source,
                };
                warn!(user_id = %user_id, error = %error, "deleting user failed");
                self.notifier.failed(&operation, &error);
                Err(error)
            }
        }
    }
}

fn ensure_no_pending_delete(
    in_flight: &InFlightRequests,
    user_id: &UserId,
) -> Result<(), UserAdminError> {
    if in_flight.latest_kind(user_id) == Some(RequestKind::Delete) {
        return Err(UserAdminError::RequestInFlight {
            user_id: user_id.clone(),
            kind: RequestKind::Delete,
        });
    }

    Ok(())
}
