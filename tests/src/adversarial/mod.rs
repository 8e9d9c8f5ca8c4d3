//! # Adversarial Deliveries
//!
//! Requests an attacker or a misbehaving provider could send.

pub mod forgery;
pub mod replay;
pub mod retry_storm;
