//! Credential handling: password hashing and HTTP Basic decoding.

pub mod basic;
pub mod password;
