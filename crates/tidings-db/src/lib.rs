//! Persistence for news, events and bookings.
//!
//! `store` exposes the collections as shared trait objects with a PostgreSQL
//! backend (`diesel-async` over a bb8 pool) and an in-memory backend used for
//! development and tests. `db` holds the diesel schema, column enums, query
//! builders and the migration runner.

pub mod db;
pub mod error;
pub mod model;
pub mod store;
