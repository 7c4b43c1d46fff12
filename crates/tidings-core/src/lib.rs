//! Domain types and the pure content engines shared by every Tidings crate.
//!
//! ## Module Organization
//!
//! - `config`: settings loaded from defaults, `config.toml` and the environment
//! - `model`: news, event and booking records plus their write drafts
//! - `speaker`: canonical speaker lists from heterogeneous event fields
//! - `schedule`: upcoming/expired classification of events against a wall clock
//! - `feed`: the merged news/event aggregate and its carousel window
//! - `filter`: back-office search and category filtering over the aggregate

pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod schedule;
pub mod speaker;
pub mod types;
