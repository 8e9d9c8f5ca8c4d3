//! Pure verification logic.

pub mod errors;
pub mod header;
pub mod signature;
pub mod verify;
