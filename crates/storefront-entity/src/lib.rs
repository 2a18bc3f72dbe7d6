//! # storefront-entity
//!
//! Domain models shared by the auth, storage and API crates.

pub mod user;
