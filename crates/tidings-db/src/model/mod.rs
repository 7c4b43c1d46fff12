//! Diesel row types for the three tables.

pub mod booking;
pub mod event;
pub mod news;
