//! Transaction helper for multi-statement writes.
//!
//! ```rust,ignore
//! use diesel_async::scoped_futures::ScopedFutureExt;
//!
//! with_transaction(&mut conn, |tx| async move {
//!     let active = query::booking::active_for(event_id, &email).count().get_result::<i64>(tx).await?;
//!     // ...
//!     Ok(())
//! }.scope_boxed()).await?;
//! ```

use diesel_async::{AsyncConnection, scoped_futures::ScopedBoxFuture};

use crate::db::connection::DbConnection;
use crate::error::{DbError, DbResult};

/// ## Summary
/// Runs `callback` inside a database transaction and returns its result.
///
/// ## Errors
/// Returns any error produced by the closure, or errors raised while starting
/// or committing the transaction. The transaction is rolled back on error.
pub async fn with_transaction<'a, 'conn, T, F>(
    conn: &'a mut DbConnection<'conn>,
    callback: F,
) -> DbResult<T>
where
    F: for<'r> FnOnce(&'r mut DbConnection<'conn>) -> ScopedBoxFuture<'a, 'r, DbResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    conn.transaction::<_, DbError, _>(callback).await
}
