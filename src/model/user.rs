use uuid::Uuid;

use crate::model::role::Role;

/// Directory-owned account record. `password_hash` is always an argon2 PHC
/// string, never a plaintext password.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}
