use entity::sea_orm_active_enums::Role;
use serde::{Deserialize, Serialize};

use crate::server::error::auth::AuthError;

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i32,
    /// Role string as stored in the database
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
    /// Raw token, kept so it can be revoked on logout
    pub token: String,
    /// Token expiry as a unix timestamp
    pub expires_at: i64,
}

impl Identity {
    /// Checks the caller against a role allow-list and an optional owner.
    ///
    /// # Arguments
    /// - `allowed` - Roles permitted to perform the operation, empty permits any role
    /// - `owner` - User ID owning the target resource, if ownership matters
    ///
    /// # Returns
    /// - `Ok(())` - Caller may proceed
    /// - `Err(AuthError::Forbidden)` - Role not allowed, or caller is not the owner
    pub fn authorize(&self, allowed: &[Role], owner: Option<i32>) -> Result<(), AuthError> {
        if !allowed.is_empty() && !allowed.contains(&self.role) {
            return Err(AuthError::Forbidden);
        }

        if let Some(owner_id) = owner {
            if owner_id != self.user_id {
                return Err(AuthError::Forbidden);
            }
        }

        Ok(())
    }

    /// Moderators and admins can see and moderate every system.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Moderator | Role::Admin)
    }
}

/// Roles allowed to manage the catalog and moderate systems
pub static STAFF_ROLES: &[Role] = &[Role::Moderator, Role::Admin];

/// Roles allowed to assemble and submit drafts
pub static OWNER_ROLES: &[Role] = &[Role::User];
