//! Hashing primitives for Strata.
//!
//! Every hash-addressed structure derives its slots as `hash(salt ‖ key)`
//! where the salt is a fixed domain-separation prefix, optionally followed by
//! an instance identifier. The prefixes in [`domain`] are part of the
//! persisted format and must never change.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod domain;
pub mod hasher;

pub use hasher::{HashAlgorithm, SaltedHasher};
