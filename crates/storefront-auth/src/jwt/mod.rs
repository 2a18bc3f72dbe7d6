//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod clock;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod manager;

pub use claims::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use error::TokenError;
pub use manager::TokenManager;
