//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod edit;
mod user;

pub use access::{AccountStatus, Permission, PermissionSet, Role};
pub use edit::{EditableFields, FieldUpdate};
pub use user::{UserId, UserRecord, name_matches};
