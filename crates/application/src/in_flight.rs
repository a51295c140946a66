//! Per-record tags for requests that have not resolved yet.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use roster_domain::UserId;

/// Kind of request tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `PUT /updateuser/{id}`.
    Save,
    /// `DELETE /deleteuser/{id}`.
    Delete,
}

impl RequestKind {
    /// Returns a stable name for logs and errors.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

impl Display for RequestKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Tag handed out when a request is issued and compared when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: RequestTicket,
    kind: RequestKind,
    outstanding: usize,
}

/// Registry of the latest in-flight request per record.
#[derive(Debug, Default)]
pub struct InFlightRequests {
    next_sequence: u64,
    pending: HashMap<UserId, Pending>,
}

impl InFlightRequests {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request for `user_id`; it becomes the latest one.
    pub fn issue(&mut self, user_id: &UserId, kind: RequestKind) -> RequestTicket {
        self.next_sequence = self.next_sequence.saturating_add(1);
        let ticket = RequestTicket(self.next_sequence);
        let outstanding = self
            .pending
            .get(user_id)
            .map_or(0, |pending| pending.outstanding);

        self.pending.insert(
            user_id.clone(),
            Pending {
                ticket,
                kind,
                outstanding: outstanding.saturating_add(1),
            },
        );

        ticket
    }

    /// Marks a request as resolved.
    ///
    /// Returns `true` when `ticket` was still the latest request for the
    /// record, `false` when a newer request superseded it.
    pub fn settle(&mut self, user_id: &UserId, ticket: RequestTicket) -> bool {
        let Some(pending) = self.pending.get_mut(user_id) else {
            return false;
        };

        let latest = pending.ticket == ticket;
        pending.outstanding = pending.outstanding.saturating_sub(1);
        if pending.outstanding == 0 {
            self.pending.remove(user_id);
        }

        latest
    }

    /// Returns the kind of the latest unresolved request for `user_id`.
    #[must_use]
    pub fn latest_kind(&self, user_id: &UserId) -> Option<RequestKind> {
        self.pending.get(user_id).map(|pending| pending.kind)
    }
}
