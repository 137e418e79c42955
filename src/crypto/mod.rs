//! FIRESIGHT - Cryptographic Core
//!
//! Key lifecycle and authenticated encryption for the audit log.

pub mod aead;
pub mod keys;

pub use aead::*;
pub use keys::*;
