use std::future::Future;
use std::pin::Pin;

use tidings_core::feed::{FeedItem, aggregate};
use tidings_core::model::Pagination;
use tidings_db::store::{EventFilter, NewsFilter, Store};

use crate::error::ServiceResult;

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = ServiceResult<Vec<FeedItem>>> + Send + 'a>>;

/// Where a feed session reads the merged feed from.
pub trait FeedSource: Send + Sync {
    /// Fetches both collections and returns their aggregate.
    fn fetch(&self) -> FetchFuture<'_>;
}

/// Published news and every event, read from the store.
#[derive(Debug, Clone)]
pub struct StoreFeedSource {
    store: Store,
}

impl StoreFeedSource {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

impl FeedSource for StoreFeedSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let (news, events) = futures::try_join!(
                self.store
                    .news
                    .list(NewsFilter { published_only: true }, Pagination::all()),
                self.store
                    .events
                    .list(EventFilter::default(), Pagination::all()),
            )?;
            Ok(aggregate(news.items, events.items))
        })
    }
}
