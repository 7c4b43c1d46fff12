//! Admin authentication.
//!
//! ## Module Organization
//!
//! - `authenticate`: resolves the admin identity of a request (single user, HTTP Basic, proxy)
//! - `password`: password hashing and verification with Argon2

pub mod authenticate;
pub mod password;

pub use authenticate::{AdminIdentity, authenticate};
