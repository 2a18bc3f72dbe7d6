//! Role-based route guarding.

pub mod gate;

pub use gate::RoleGate;
