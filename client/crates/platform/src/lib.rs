//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Constant-time comparison for local secrets
//! - Clear text code handling with memory zeroization
//! - Secure key/value storage port (keychain-equivalent)
//! - Platform biometric port (fingerprint/face)

pub mod biometrics;
pub mod code;
pub mod crypto;
pub mod secure_store;
