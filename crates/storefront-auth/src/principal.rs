//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};

use storefront_entity::user::UserRole;

use crate::jwt::Claims;

/// Identity derived from a verified token.
///
/// Lives only for the request that presented the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque subject identifier (the user id).
    pub subject_id: String,
    /// Email at the time of issuance.
    pub email: String,
    /// Role at the time of issuance.
    pub role: UserRole,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
