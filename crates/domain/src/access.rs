use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use roster_core::AppError;
use serde::{Deserialize, Serialize};

/// Role assigned to a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    /// Can change content.
    Editor,
    /// Read-only access.
    Viewer,
    /// Technical access.
    Developer,
}

impl Role {
    /// Returns the transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
            Self::Developer => "Developer",
        }
    }

    /// Returns all roles in the order offered to administrators.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Editor, Role::Viewer, Role::Developer];

        ALL
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AppError::Validation(format!("unknown role '{value}'")))
    }
}

impl TryFrom<String> for Role {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether an account is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AccountStatus {
    /// Account may sign in.
    Active,
    /// Account is disabled.
    Inactive,
}

impl AccountStatus {
    /// Returns the transport value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Returns all statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AccountStatus] = &[AccountStatus::Active, AccountStatus::Inactive];

        ALL
    }
}

impl Display for AccountStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AppError::Validation(format!("unknown account status '{value}'")))
    }
}

impl TryFrom<String> for AccountStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Single access grant on a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Permission {
    /// Read access.
    Read,
    /// Write access.
    Write,
    /// Execute access.
    Execute,
}

impl Permission {
    /// Returns the transport value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Execute => "Execute",
        }
    }

    /// Returns the label shown in permission pickers.
    ///
    /// `Execute` is presented to administrators as "Edit".
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Execute => "Edit",
        }
    }

    /// Returns all permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[Permission::Read, Permission::Write, Permission::Execute];

        ALL
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AppError::Validation(format!("unknown permission '{value}'")))
    }
}

impl TryFrom<String> for Permission {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Unordered set of permissions.
///
/// Edits always replace the whole set; there is no per-member toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty permission set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the set grants `permission`.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Returns the number of distinct permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no permission is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates permissions in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Permission; N]> for PermissionSet {
    fn from(value: [Permission; N]) -> Self {
        value.into_iter().collect()
    }
}

impl Display for PermissionSet {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .iter()
            .map(|permission| permission.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        formatter.write_str(rendered.as_str())
    }
}

impl FromStr for PermissionSet {
    type Err = AppError;

    /// Parses a comma separated list such as `Read, Write`. An empty string
    /// yields an empty set.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Permission::from_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("editor".parse::<Role>().ok(), Some(Role::Editor));
        assert_eq!(" Developer ".parse::<Role>().ok(), Some(Role::Developer));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert_eq!("inactive".parse::<AccountStatus>().ok(), Some(AccountStatus::Inactive));
        assert!("suspended".parse::<AccountStatus>().is_err());
    }

    #[test]
    fn permission_set_collapses_duplicates() {
        let set: PermissionSet = "Read, write, READ".parse().unwrap_or_else(|_| unreachable!());
        assert_eq!(set.len(), 2);
        assert!(set.contains(Permission::Read));
        assert!(set.contains(Permission::Write));
        assert!(!set.contains(Permission::Execute));
    }

    #[test]
    fn empty_permission_list_parses_to_empty_set() {
        let set: PermissionSet = "  ".parse().unwrap_or_else(|_| unreachable!());
        assert!(set.is_empty());
    }

    #[test]
    fn permission_set_rejects_unknown_member() {
        assert!("Read, Delete".parse::<PermissionSet>().is_err());
    }

    #[test]
    fn execute_is_labelled_edit() {
        assert_eq!(Permission::Execute.label(), "Edit");
        assert_eq!(Permission::Execute.as_str(), "Execute");
    }

    #[test]
    fn permission_set_serializes_as_array() {
        let set = PermissionSet::from([Permission::Write, Permission::Read]);
        let encoded = serde_json::to_value(&set).unwrap_or_else(|_| unreachable!());
        assert_eq!(encoded, serde_json::json!(["Read", "Write"]));
    }

    #[test]
    fn permission_set_deserializes_with_duplicates() {
        let decoded: PermissionSet = serde_json::from_value(serde_json::json!(["Read", "Read"]))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(decoded, PermissionSet::from([Permission::Read]));
    }

    #[test]
    fn wire_values_decode_like_parsed_values() {
        let role: Role = serde_json::from_value(serde_json::json!("developer"))
            .unwrap_or_else(|_| unreachable!());
        let status: AccountStatus = serde_json::from_value(serde_json::json!("INACTIVE"))
            .unwrap_or_else(|_| unreachable!());
        let permissions: PermissionSet =
            serde_json::from_value(serde_json::json!(["read", "Execute"]))
                .unwrap_or_else(|_| unreachable!());

        assert_eq!(role, Role::Developer);
        assert_eq!(status, AccountStatus::Inactive);
        assert_eq!(
            permissions,
            PermissionSet::from([Permission::Read, Permission::Execute])
        );
        assert!(serde_json::from_value::<Role>(serde_json::json!("Root")).is_err());
    }
}
