//! The merged news/event feed.
//!
//! - `aggregate`: tagging, merging and ordering of the two collections
//! - `carousel`: the fixed-size rotating window shown on the home page

pub mod aggregate;
pub mod carousel;

pub use aggregate::{FeedItem, FeedKey, aggregate};
pub use carousel::{Carousel, WrapMode};
