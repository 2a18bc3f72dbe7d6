//! Role gate: checks an already-authenticated principal against a required role.

use storefront_core::error::AppError;
use storefront_entity::user::UserRole;

use crate::principal::Principal;

/// Restricts access to principals holding at least `required`.
///
/// Only meaningful after authentication has attached a [`Principal`]; a
/// missing principal is treated the same as an insufficient role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    required: UserRole,
}

impl RoleGate {
    /// Creates a gate for the given minimum role.
    pub fn new(required: UserRole) -> Self {
        Self { required }
    }

    /// Returns `Ok(())` if allowed, or a `Forbidden` error if denied.
    pub fn check(&self, principal: Option<&Principal>) -> Result<(), AppError> {
        match principal {
            Some(p) if p.role.has_at_least(&self.required) => Ok(()),
            Some(p) => Err(AppError::forbidden(format!(
                "Role '{}' is insufficient; required: '{}'",
                p.role, self.required
            ))),
            None => Err(AppError::forbidden("Access forbidden")),
        }
    }
}
