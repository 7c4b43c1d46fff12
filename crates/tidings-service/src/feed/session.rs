use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::error::Elapsed;
use tokio::time::{Instant, MissedTickBehavior, Timeout};

use tidings_core::config::FeedConfig;
use tidings_core::feed::{Carousel, FeedItem};

use super::source::{FeedSource, FetchFuture};
use crate::error::{ServiceError, ServiceResult};

const COMMAND_BUFFER: usize = 16;

/// Manual carousel controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Next,
    Previous,
}

/// The feed as last fetched, with the carousel position over it.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub items: Arc<[FeedItem]>,
    pub carousel: Carousel,
    /// Time of the last successful fetch. `None` until the first one.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// One rendered carousel window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedWindow {
    pub items: Vec<FeedItem>,
    pub start: usize,
    pub next: usize,
    pub previous: usize,
    pub total: usize,
    pub window_size: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl FeedSnapshot {
    fn empty(config: &FeedConfig) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            carousel: Carousel::new(config.window_size, config.wrap),
            refreshed_at: None,
        }
    }

    /// The window at the session's current cursor.
    #[must_use]
    pub fn window(&self) -> FeedWindow {
        self.window_at(self.carousel.start())
    }

    /// The window at `start`, clamped by the wrap rule. Does not move the
    /// session's cursor.
    #[must_use]
    pub fn window_at(&self, start: usize) -> FeedWindow {
        let carousel = self.carousel.at(start);
        FeedWindow {
            items: carousel.visible(&self.items).into_iter().cloned().collect(),
            start: carousel.start(),
            next: carousel.next_start(),
            previous: carousel.previous_start(),
            total: carousel.len(),
            window_size: carousel.window_size(),
            refreshed_at: self.refreshed_at,
        }
    }
}

/// Read side of a running feed session.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    snapshot: watch::Receiver<Arc<FeedSnapshot>>,
    commands: mpsc::Sender<FeedCommand>,
}

impl FeedHandle {
    /// The latest snapshot. Never blocks on a refresh in flight.
    #[must_use]
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// ## Errors
    /// Returns `FeedClosed` once the session is gone.
    pub async fn next(&self) -> ServiceResult<()> {
        self.send(FeedCommand::Next).await
    }

    /// ## Errors
    /// Returns `FeedClosed` once the session is gone.
    pub async fn previous(&self) -> ServiceResult<()> {
        self.send(FeedCommand::Previous).await
    }

    async fn send(&self, command: FeedCommand) -> ServiceResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_err| ServiceError::FeedClosed)
    }

    /// ## Summary
    /// Waits for the next published snapshot and returns it.
    ///
    /// ## Errors
    /// Returns `FeedClosed` once the session is gone.
    pub async fn changed(&mut self) -> ServiceResult<Arc<FeedSnapshot>> {
        self.snapshot
            .changed()
            .await
            .map_err(|_err| ServiceError::FeedClosed)?;
        Ok(self.snapshot.borrow_and_update().clone())
    }
}

/// ## Summary
/// A running home feed: one background task that polls the source, ticks the
/// carousel and applies manual steps.
///
/// ## Side Effects
/// Spawns a tokio task on creation and aborts it on drop.
#[derive(Debug)]
pub struct FeedSession {
    task: JoinHandle<()>,
    handle: FeedHandle,
}

impl FeedSession {
    /// Starts the session. The first poll runs immediately.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(source: Arc<dyn FeedSource>, config: &FeedConfig) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(FeedSnapshot::empty(config)));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(run(source, config.clone(), snapshot_tx, command_rx));
        tracing::info!(
            poll_interval_ms = config.poll_interval_ms,
            tick_interval_ms = config.tick_interval_ms,
            window_size = config.window_size,
            "Feed session started"
        );
        Self {
            task,
            handle: FeedHandle {
                snapshot: snapshot_rx,
                commands: command_tx,
            },
        }
    }

    #[must_use]
    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A fetch in flight, bounded by the poll interval.
type InFlight<'a> = Pin<Box<Timeout<FetchFuture<'a>>>>;

type FetchOutcome = Result<ServiceResult<Vec<FeedItem>>, Elapsed>;

/// ## Summary
/// The session loop. A fetch runs as its own branch next to the ticks and
/// commands, so the carousel keeps moving while the source is slow. A poll
/// that finds the previous fetch still pending replaces it.
async fn run(
    source: Arc<dyn FeedSource>,
    config: FeedConfig,
    snapshot: watch::Sender<Arc<FeedSnapshot>>,
    mut commands: mpsc::Receiver<FeedCommand>,
) {
    let poll_every = config.poll_interval();
    let mut poll = tokio::time::interval(poll_every);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let tick_every = config.tick_interval();
    let mut tick = tokio::time::interval_at(Instant::now() + tick_every, tick_every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight: Option<InFlight<'_>> = None;

    loop {
        tokio::select! {
            _ = poll.tick() => {
                if in_flight.is_some() {
                    tracing::warn!(
                        error = %stale(poll_every),
                        "Feed refresh superseded, keeping previous snapshot"
                    );
                }
                in_flight = Some(Box::pin(tokio::time::timeout(poll_every, source.fetch())));
            }
            outcome = settle(&mut in_flight) => {
                in_flight = None;
                publish(outcome, poll_every, &snapshot);
            }
            _ = tick.tick() => step(&snapshot, Carousel::advance),
            command = commands.recv() => match command {
                Some(FeedCommand::Next) => step(&snapshot, Carousel::advance),
                Some(FeedCommand::Previous) => step(&snapshot, Carousel::retreat),
                None => break,
            },
        }
    }
    tracing::debug!("Feed session stopped");
}

/// Resolves with the outcome of the fetch in flight; pends forever when idle.
async fn settle(in_flight: &mut Option<InFlight<'_>>) -> FetchOutcome {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

fn stale(timeout: Duration) -> ServiceError {
    ServiceError::TransientFetch(format!("no response within {}ms", timeout.as_millis()))
}

/// Moves the cursor, notifying readers only if it actually moved.
fn step(snapshot: &watch::Sender<Arc<FeedSnapshot>>, movement: fn(&mut Carousel)) {
    snapshot.send_if_modified(|current| {
        let mut carousel = current.carousel;
        movement(&mut carousel);
        if carousel == current.carousel {
            return false;
        }
        *current = Arc::new(FeedSnapshot {
            carousel,
            ..FeedSnapshot::clone(current)
        });
        true
    });
}

/// ## Summary
/// Swaps a fetched aggregate in.
///
/// Readers are notified only when the items changed; the cursor is clamped
/// to the new length. A failed or timed-out fetch keeps the previous
/// snapshot.
#[tracing::instrument(skip_all)]
fn publish(outcome: FetchOutcome, timeout: Duration, snapshot: &watch::Sender<Arc<FeedSnapshot>>) {
    let items = match outcome {
        Ok(Ok(items)) => items,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Feed refresh failed, keeping previous snapshot");
            return;
        }
        Err(_elapsed) => {
            tracing::warn!(
                error = %stale(timeout),
                "Feed refresh timed out, keeping previous snapshot"
            );
            return;
        }
    };

    let refreshed_at = Utc::now();
    let notified = snapshot.send_if_modified(|current| {
        let changed = *current.items != *items;
        let mut next = FeedSnapshot::clone(current);
        next.refreshed_at = Some(refreshed_at);
        if changed {
            next.carousel.resize(items.len());
            next.items = Arc::from(items);
        }
        *current = Arc::new(next);
        changed
    });
    tracing::trace!(notified, "Feed refreshed");
}
