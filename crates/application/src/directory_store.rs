//! Client-side mirror of the remote user directory.

use std::collections::HashSet;

use roster_domain::{EditableFields, UserId, UserRecord};
use tracing::warn;

/// Authoritative local copy of every account plus the active search term.
///
/// Records are only mutated after the backend confirmed the change.
#[derive(Debug, Clone, Default)]
pub struct DirectoryStore {
    records: Vec<UserRecord>,
    search_term: String,
}

impl DirectoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a freshly fetched one.
    ///
    /// Backend order is kept. Repeated ids keep their first occurrence.
    /// Returns the number of records stored.
    pub fn replace_all(&mut self, records: Vec<UserRecord>) -> usize {
        let mut seen = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.id().clone()) {
                unique.push(record);
            } else {
                warn!(user_id = %record.id(), "dropping duplicate user id from directory listing");
            }
        }

        self.records = unique;
        self.records.len()
    }

    /// Updates the search filter. Never triggers a fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Returns the active search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        self.search_term.as_str()
    }

    /// Records whose name contains the search term, ignoring case, in
    /// collection order.
    pub fn visible_records(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        let term = self.search_term.as_str();
        self.records
            .iter()
            .filter(move |record| record.matches_search(term))
    }

    /// Every record, ignoring the search term.
    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        self.records.as_slice()
    }

    /// Looks up one record.
    #[must_use]
    pub fn record(&self, user_id: &UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id() == user_id)
    }

    /// Returns whether the record is present.
    #[must_use]
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.record(user_id).is_some()
    }

    /// Number of records, ignoring the search term.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the directory holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes a record after a confirmed delete.
    pub fn remove_record(&mut self, user_id: &UserId) -> Option<UserRecord> {
        let position = self
            .records
            .iter()
            .position(|record| record.id() == user_id)?;
        Some(self.records.remove(position))
    }

    /// Merges confirmed fields into an existing record.
    ///
    /// Returns `false` when the record is gone; nothing is inserted then.
    pub fn apply_edit(&mut self, user_id: &UserId, fields: &EditableFields) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| record.id() == user_id)
        {
            Some(record) => {
                record.apply_fields(fields);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use roster_domain::{AccountStatus, Permission, PermissionSet, Role};

    use super::*;

    fn user(id: &str, name: &str) -> UserRecord {
        UserRecord::new(
            UserId::new(id).unwrap_or_else(|_| unreachable!()),
            name,
            format!("{}@example.com", name.to_lowercase()),
            Role::Viewer,
            AccountStatus::Active,
            PermissionSet::from([Permission::Read]),
        )
    }

    fn id(value: &str) -> UserId {
        UserId::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn visible_ids(store: &DirectoryStore) -> Vec<String> {
        store
            .visible_records()
            .map(|record| record.id().to_string())
            .collect()
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann"), user("2", "Bob")]);

        store.set_search_term("an");

        assert_eq!(visible_ids(&store), vec!["1"]);
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("3", "Cid"), user("1", "Ann"), user("2", "Bob")]);

        assert_eq!(visible_ids(&store), vec!["3", "1", "2"]);
    }

    #[test]
    fn visible_records_is_restartable() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann"), user("2", "Anna")]);
        store.set_search_term("ANN");

        assert_eq!(visible_ids(&store), visible_ids(&store));
        assert_eq!(store.visible_records().count(), 2);
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let mut store = DirectoryStore::new();
        let stored = store.replace_all(vec![user("1", "Ann"), user("1", "Impostor")]);

        assert_eq!(stored, 1);
        assert_eq!(store.record(&id("1")).map(UserRecord::name), Some("Ann"));
    }

    #[test]
    fn replace_all_is_a_full_replace() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann"), user("2", "Bob")]);
        store.replace_all(vec![user("3", "Cid")]);

        assert_eq!(store.len(), 1);
        assert!(!store.contains(&id("1")));
    }

    #[test]
    fn removed_record_is_hidden_for_any_term() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann"), user("2", "Bob")]);

        assert!(store.remove_record(&id("1")).is_some());

        for term in ["", "a", "ann", "ANN", "b"] {
            store.set_search_term(term);
            assert!(store.visible_records().all(|record| record.id() != &id("1")));
        }
    }

    #[test]
    fn apply_edit_on_missing_record_is_a_no_op() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann")]);
        let fields = user("9", "Ghost").editable_fields();

        assert!(!store.apply_edit(&id("9"), &fields));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn apply_edit_updates_only_target() {
        let mut store = DirectoryStore::new();
        store.replace_all(vec![user("1", "Ann"), user("2", "Bob")]);
        let mut fields = user("2", "Bob").editable_fields();
        fields.role = Role::Editor;

        assert!(store.apply_edit(&id("2"), &fields));

        assert_eq!(store.record(&id("2")).map(UserRecord::role), Some(Role::Editor));
        assert_eq!(store.record(&id("1")).map(UserRecord::role), Some(Role::Viewer));
    }

    proptest! {
        #[test]
        fn visible_records_equals_filtered_collection(
            names in proptest::collection::vec("[a-cA-C]{1,5}", 0..8),
            term in "[a-cA-C]{0,2}",
        ) {
            let records: Vec<UserRecord> = names
                .iter()
                .enumerate()
                .map(|(index, name)| user(index.to_string().as_str(), name))
                .collect();
            let expected: Vec<String> = records
                .iter()
                .filter(|record| record.name().to_lowercase().contains(term.to_lowercase().as_str()))
                .map(|record| record.id().to_string())
                .collect();

            let mut store = DirectoryStore::new();
            store.replace_all(records);
            store.set_search_term(term.clone());

            prop_assert_eq!(visible_ids(&store), expected);
        }
    }
}
