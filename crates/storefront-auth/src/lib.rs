//! # storefront-auth
//!
//! Stateless authentication and authorization core for the storefront.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: token issuance and verification under a single shared secret
//! - `rbac`: role gate applied after authentication
//! - `principal`: the authenticated identity carried through a request

pub mod jwt;
pub mod password;
pub mod principal;
pub mod rbac;

pub use jwt::{
    Claims, Clock, JwtDecoder, JwtEncoder, ManualClock, SystemClock, TokenError, TokenManager,
};
pub use password::PasswordHasher;
pub use principal::Principal;
pub use rbac::RoleGate;
