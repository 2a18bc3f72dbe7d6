//! # storefront-database
//!
//! Persistence seam for user accounts. Handlers depend on the
//! [`UserRepository`](repositories::user::UserRepository) trait; the bundled
//! implementation keeps accounts in process memory.

pub mod repositories;

pub use repositories::user::{MemoryUserRepository, UserRepository};
