use roster_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{AccountStatus, PermissionSet, Role};

/// Editable subset of an account, sent as the update request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableFields {
    /// Assigned role.
    pub role: Role,
    /// Account status.
    pub status: AccountStatus,
    /// Granted permissions.
    #[serde(rename = "permission", alias = "permissions")]
    pub permissions: PermissionSet,
}

impl EditableFields {
    /// Applies one field update in place.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Role(role) => self.role = role,
            FieldUpdate::Status(status) => self.status = status,
            FieldUpdate::Permissions(permissions) => self.permissions = permissions,
        }
    }
}

/// Replacement value for one editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replaces the role.
    Role(Role),
    /// Replaces the status.
    Status(AccountStatus),
    /// Replaces the whole permission set.
    Permissions(PermissionSet),
}

impl FieldUpdate {
    /// Parses a field name and a transport value into an update.
    ///
    /// Accepted field names are `role`, `status`, and `permission` (or
    /// `permissions`), the latter taking a comma separated list.
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "role" => Ok(Self::Role(value.parse()?)),
            "status" => Ok(Self::Status(value.parse()?)),
            "permission" | "permissions" => Ok(Self::Permissions(value.parse()?)),
            other => Err(AppError::Validation(format!(
                "unknown editable field '{other}'"
            ))),
        }
    }

    /// Returns the name of the field this update addresses.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Role(_) => "role",
            Self::Status(_) => "status",
            Self::Permissions(_) => "permission",
        }
    }
}
