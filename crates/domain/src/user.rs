//! Directory account types.

use std::fmt::{Display, Formatter};

use roster_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{AccountStatus, EditableFields, PermissionSet, Role};

/// Opaque identifier assigned to an account by the directory backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated identifier. Blank identifiers are rejected.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "user id must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// One account as returned by the directory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id")]
    id: UserId,
    name: String,
    #[serde(default)]
    email: String,
    role: Role,
    status: AccountStatus,
    #[serde(rename = "permission", alias = "permissions", default)]
    permissions: PermissionSet,
}

impl UserRecord {
    /// Creates an account record.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        status: AccountStatus,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            status,
            permissions,
        }
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name, which is also the search key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the email address shown in the details view.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Returns the granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns a detached copy of the fields an administrator may edit.
    #[must_use]
    pub fn editable_fields(&self) -> EditableFields {
        EditableFields {
            role: self.role,
            status: self.status,
            permissions: self.permissions.clone(),
        }
    }

    /// Overwrites the editable fields with `fields`.
    pub fn apply_fields(&mut self, fields: &EditableFields) {
        self.role = fields.role;
        self.status = fields.status;
        self.permissions = fields.permissions.clone();
    }

    /// Returns whether the name contains `term`, ignoring case.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        name_matches(self.name.as_str(), term)
    }
}

/// Case-insensitive substring match used by directory search.
///
/// An empty term matches every name.
#[must_use]
pub fn name_matches(name: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    name.to_lowercase().contains(term.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Permission;

    fn record() -> UserRecord {
        UserRecord::new(
            UserId::new("2").unwrap_or_else(|_| unreachable!()),
            "Bob",
            "bob@example.com",
            Role::Viewer,
            AccountStatus::Active,
            PermissionSet::from([Permission::Read]),
        )
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(UserId::new("  ").is_err());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(name_matches("Ann", "an"));
        assert!(name_matches("Joanna", "ANN"));
        assert!(!name_matches("Bob", "an"));
        assert!(name_matches("Bob", ""));
    }

    #[test]
    fn decodes_backend_document() {
        let decoded: UserRecord = serde_json::from_value(serde_json::json!({
            "_id": "65f1c0",
            "name": "Ann",
            "email": "ann@example.com",
            "role": "Editor",
            "status": "Inactive",
            "permission": ["Read", "Execute"],
            "__v": 0
        }))
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(decoded.id().as_str(), "65f1c0");
        assert_eq!(decoded.role(), Role::Editor);
        assert_eq!(decoded.status(), AccountStatus::Inactive);
        assert_eq!(
            decoded.permissions(),
            &PermissionSet::from([Permission::Read, Permission::Execute])
        );
    }

    #[test]
    fn decodes_plural_permissions_alias() {
        let decoded: Result<UserRecord, _> = serde_json::from_value(serde_json::json!({
            "id": "7",
            "name": "Eve",
            "role": "Developer",
            "status": "Active",
            "permissions": ["Write"]
        }));

        let decoded = decoded.unwrap_or_else(|_| unreachable!());
        assert_eq!(decoded.email(), "");
        assert!(decoded.permissions().contains(Permission::Write));
    }

    #[test]
    fn unknown_role_fails_decoding() {
        let decoded: Result<UserRecord, _> = serde_json::from_value(serde_json::json!({
            "_id": "1",
            "name": "Ann",
            "role": "Admin",
            "status": "Active",
            "permission": []
        }));
        assert!(decoded.is_err());
    }

    #[test]
    fn apply_fields_leaves_identity_untouched() {
        let mut user = record();
        let mut fields = user.editable_fields();
        fields.role = Role::Editor;
        fields.permissions = PermissionSet::new();

        user.apply_fields(&fields);

        assert_eq!(user.id().as_str(), "2");
        assert_eq!(user.name(), "Bob");
        assert_eq!(user.role(), Role::Editor);
        assert!(user.permissions().is_empty());
    }

    proptest! {
        #[test]
        fn matching_agrees_with_lowercase_contains(name in "[a-zA-Z ]{0,12}", term in "[a-zA-Z]{0,4}") {
            let expected = name.to_lowercase().contains(term.to_lowercase().as_str());
            prop_assert_eq!(name_matches(name.as_str(), term.as_str()), expected);
        }

        #[test]
        fn every_name_contains_its_own_slices(name in "[a-zA-Z]{1,12}", start in 0usize..12, len in 0usize..12) {
            let start = start.min(name.len());
            let end = (start + len).min(name.len());
            let term = name[start..end].to_uppercase();
            prop_assert!(name_matches(name.as_str(), term.as_str()));
        }
    }
}
