//! The public home feed.
//!
//! ## Summary
//! A [`FeedSession`] keeps the merged news/event feed fresh by polling a
//! [`FeedSource`] and rotates a carousel window over it. The session task is
//! the only writer; any number of [`FeedHandle`]s read the latest
//! [`FeedSnapshot`] and send manual next/previous steps.

pub mod session;
pub mod source;

pub use session::{FeedCommand, FeedHandle, FeedSession, FeedSnapshot, FeedWindow};
pub use source::{FeedSource, FetchFuture, StoreFeedSource};
