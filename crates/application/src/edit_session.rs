//! Inline edit session scoped to one record at a time.

use roster_domain::{EditableFields, FieldUpdate, UserId, UserRecord};
use tracing::info;

use crate::{RequestTicket, UserAdminError};

/// Edit session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No record is being edited.
    #[default]
    Idle,
    /// Scratch fields are being changed.
    Editing {
        /// Edited record.
        user_id: UserId,
        /// Uncommitted copy of the editable fields.
        scratch: EditableFields,
    },
    /// Scratch fields were sent to the backend.
    Saving {
        /// Edited record.
        user_id: UserId,
        /// Payload of the pending update.
        scratch: EditableFields,
        /// Tag of the pending update request.
        ticket: RequestTicket,
    },
}

impl EditState {
    /// Returns a stable state name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing { .. } => "editing",
            Self::Saving { .. } => "saving",
        }
    }
}

/// Mediates one record's uncommitted edits.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Returns the record being edited or saved.
    #[must_use]
    pub fn target(&self) -> Option<&UserId> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing { user_id, .. } | EditState::Saving { user_id, .. } => {
                Some(user_id)
            }
        }
    }

    /// Returns the scratch fields while editing or saving.
    #[must_use]
    pub fn scratch(&self) -> Option<&EditableFields> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing { scratch, .. } | EditState::Saving { scratch, .. } => {
                Some(scratch)
            }
        }
    }

    /// Returns whether an update request is pending.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditState::Saving { .. })
    }

    /// Starts editing `record`, seeding the scratch from its current values.
    ///
    /// Switching from another record silently drops that record's scratch;
    /// the dropped target is returned.
    pub fn begin(&mut self, record: &UserRecord) -> Result<Option<UserId>, UserAdminError> {
        let discarded = match &self.state {
            EditState::Idle => None,
            EditState::Editing { user_id, .. } => Some(user_id.clone()),
            EditState::Saving { .. } => return Err(self.invalid("begin editing")),
        };

        if let Some(previous) = &discarded {
            info!(
                discarded_user_id = %previous,
                user_id = %record.id(),
                "discarding unsaved edit to switch target"
            );
        }

        self.state = EditState::Editing {
            user_id: record.id().clone(),
            scratch: record.editable_fields(),
        };

        Ok(discarded)
    }

    /// Replaces one scratch field.
    pub fn update_field(&mut self, update: FieldUpdate) -> Result<(), UserAdminError> {
        if let EditState::Editing { scratch, .. } = &mut self.state {
            scratch.apply(update);
            return Ok(());
        }

        Err(self.invalid("update a field"))
    }

    /// Moves to `Saving` and returns the payload to send.
    pub fn start_save(
        &mut self,
        ticket: RequestTicket,
    ) -> Result<(UserId, EditableFields), UserAdminError> {
        match std::mem::take(&mut self.state) {
            EditState::Editing { user_id, scratch } => {
                self.state = EditState::Saving {
                    user_id: user_id.clone(),
                    scratch: scratch.clone(),
                    ticket,
                };
                Ok((user_id, scratch))
            }
            other => {
                self.state = other;
                Err(self.invalid("save"))
            }
        }
    }

    /// Resolves a pending save.
    ///
    /// Success returns to `Idle`; failure returns to `Editing` with the
    /// scratch intact. Nothing happens unless the session still waits for
    /// `ticket`. Returns whether the session changed.
    pub fn finish_save(&mut self, ticket: RequestTicket, succeeded: bool) -> bool {
        match std::mem::take(&mut self.state) {
            EditState::Saving {
                user_id,
                scratch,
                ticket: pending,
            } if pending == ticket => {
                if !succeeded {
                    self.state = EditState::Editing { user_id, scratch };
                }
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Drops the scratch without committing it.
    pub fn cancel(&mut self) -> Result<Option<UserId>, UserAdminError> {
        match std::mem::take(&mut self.state) {
            EditState::Idle => Ok(None),
            EditState::Editing { user_id, .. } => Ok(Some(user_id)),
            saving @ EditState::Saving { .. } => {
                self.state = saving;
                Err(self.invalid("cancel"))
            }
        }
    }

    /// Resets the session if it targets `user_id`, whatever its state.
    pub fn discard_for(&mut self, user_id: &UserId) -> bool {
        if self.target() == Some(user_id) {
            self.state = EditState::Idle;
            return true;
        }

        false
    }

    fn invalid(&self, operation: &'static str) -> UserAdminError {
        UserAdminError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use roster_domain::{AccountStatus, Permission, PermissionSet, Role};

    use super::*;
    use crate::{InFlightRequests, RequestKind};

    fn user(id: &str) -> UserRecord {
        UserRecord::new(
            UserId::new(id).unwrap_or_else(|_| unreachable!()),
            format!("user-{id}"),
            "",
            Role::Viewer,
            AccountStatus::Active,
            PermissionSet::from([Permission::Read]),
        )
    }

    fn ticket() -> RequestTicket {
        InFlightRequests::new().issue(user("t").id(), RequestKind::Save)
    }

    #[test]
    fn begin_seeds_scratch_from_record() {
        let mut session = EditSession::new();
        let record = user("1");

        assert_eq!(session.begin(&record).ok(), Some(None));
        assert_eq!(session.scratch(), Some(&record.editable_fields()));
        assert_eq!(session.target(), Some(record.id()));
    }

    #[test]
    fn switching_target_discards_previous_scratch() {
        let mut session = EditSession::new();
        let first = user("1");
        let second = user("2");
        assert!(session.begin(&first).is_ok());
        assert!(session.update_field(FieldUpdate::Role(Role::Editor)).is_ok());

        let discarded = session.begin(&second);

        assert_eq!(discarded.ok(), Some(Some(first.id().clone())));
        assert_eq!(session.scratch().map(|scratch| scratch.role), Some(Role::Viewer));
    }

    #[test]
    fn update_field_requires_editing() {
        let mut session = EditSession::new();
        let result = session.update_field(FieldUpdate::Status(AccountStatus::Inactive));

        assert!(matches!(
            result,
            Err(UserAdminError::InvalidState { state: "idle", .. })
        ));
    }

    #[test]
    fn failed_save_returns_to_editing_with_scratch() {
        let mut session = EditSession::new();
        assert!(session.begin(&user("1")).is_ok());
        assert!(session.update_field(FieldUpdate::Role(Role::Developer)).is_ok());
        let ticket = ticket();
        assert!(session.start_save(ticket).is_ok());
        assert!(session.is_saving());

        assert!(session.finish_save(ticket, false));

        assert_eq!(session.state().name(), "editing");
        assert_eq!(session.scratch().map(|scratch| scratch.role), Some(Role::Developer));
    }

    #[test]
    fn successful_save_returns_to_idle() {
        let mut session = EditSession::new();
        assert!(session.begin(&user("1")).is_ok());
        let ticket = ticket();
        assert!(session.start_save(ticket).is_ok());

        assert!(session.finish_save(ticket, true));
        assert_eq!(session.state(), &EditState::Idle);
    }

    #[test]
    fn saving_blocks_begin_update_and_cancel() {
        let mut session = EditSession::new();
        assert!(session.begin(&user("1")).is_ok());
        assert!(session.start_save(ticket()).is_ok());

        assert!(session.begin(&user("2")).is_err());
        assert!(session.update_field(FieldUpdate::Role(Role::Editor)).is_err());
        assert!(session.cancel().is_err());
        assert!(session.start_save(ticket()).is_err());
        assert!(session.is_saving());
    }

    #[test]
    fn stale_ticket_leaves_session_untouched() {
        let mut session = EditSession::new();
        assert!(session.begin(&user("1")).is_ok());
        let mut requests = InFlightRequests::new();
        let first = requests.issue(user("1").id(), RequestKind::Save);
        let second = requests.issue(user("1").id(), RequestKind::Save);
        assert!(session.start_save(second).is_ok());

        assert!(!session.finish_save(first, true));
        assert!(session.is_saving());
    }

    #[test]
    fn discard_for_resets_only_matching_target() {
        let mut session = EditSession::new();
        assert!(session.begin(&user("1")).is_ok());

        assert!(!session.discard_for(user("2").id()));
        assert!(session.discard_for(user("1").id()));
        assert_eq!(session.state(), &EditState::Idle);
    }
}
