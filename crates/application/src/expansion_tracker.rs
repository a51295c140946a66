use roster_domain::UserId;

/// Tracks the single record whose details are shown.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    expanded: Option<UserId>,
}

impl ExpansionTracker {
    /// Creates a tracker with nothing expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the expanded record, if any.
    #[must_use]
    pub fn expanded_id(&self) -> Option<&UserId> {
        self.expanded.as_ref()
    }

    /// Returns whether `user_id` is the expanded record.
    #[must_use]
    pub fn is_expanded(&self, user_id: &UserId) -> bool {
        self.expanded.as_ref() == Some(user_id)
    }

    /// Collapses `user_id` if it is expanded, otherwise expands it and
    /// implicitly collapses the previous one. Returns whether `user_id` is
    /// expanded afterwards.
    pub fn toggle(&mut self, user_id: &UserId) -> bool {
        if self.is_expanded(user_id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(user_id.clone());
            true
        }
    }

    /// Collapses only when `user_id` is the expanded record.
    pub fn collapse_if(&mut self, user_id: &UserId) -> bool {
        if self.is_expanded(user_id) {
            self.expanded = None;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> UserId {
        UserId::new(value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn expanding_second_record_collapses_first() {
        let mut tracker = ExpansionTracker::new();
        assert!(tracker.toggle(&id("a")));
        assert!(tracker.toggle(&id("b")));

        assert!(!tracker.is_expanded(&id("a")));
        assert_eq!(tracker.expanded_id(), Some(&id("b")));
    }

    #[test]
    fn toggling_same_record_collapses_it() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(&id("a"));

        assert!(!tracker.toggle(&id("a")));
        assert_eq!(tracker.expanded_id(), None);
    }

    #[test]
    fn collapse_if_ignores_other_records() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(&id("a"));

        assert!(!tracker.collapse_if(&id("b")));
        assert!(tracker.collapse_if(&id("a")));
        assert_eq!(tracker.expanded_id(), None);
    }
}
