//! Business operations over the Tidings store.
//!
//! ## Module Organization
//!
//! - `auth`: admin authentication (single user, HTTP Basic, trusted proxy)
//! - `booking`: event registration and the booking status machine
//! - `clock`: request-time instants in UTC and site-local wall time
//! - `content`: admin CRUD for news and events, public listings and views
//! - `dashboard`: back-office statistics
//! - `feed`: the polling feed session and its carousel

pub mod auth;
pub mod booking;
pub mod clock;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod feed;
