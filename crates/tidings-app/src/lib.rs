//! HTTP surface of Tidings.
//!
//! ## Module Organization
//!
//! - `app`: routers and handlers for the public and admin APIs
//! - `config`: settings and site clock injection
//! - `error`: the HTTP error type and its JSON rendering
//! - `middleware`: the admin guard
//! - `store_handler`: store and feed injection

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
