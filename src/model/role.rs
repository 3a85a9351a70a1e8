use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Role assigned by the user directory. Immutable for the lifetime of an
/// authenticated action: every component trusts the role carried by the
/// resolved identity.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        *self == Role::Manager
    }
}
