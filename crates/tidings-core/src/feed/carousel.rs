//! Fixed-size rotating window over the feed.
//!
//! ## Summary
//! The carousel keeps a cursor `start` into a sequence of `len` entries and
//! shows `window_size` of them. Advancing, retreating and resizing never move
//! the cursor out of bounds, and a window always holds exactly `window_size`
//! entries when the sequence is at least that long. When the whole sequence
//! fits in the window the cursor stays at 0.

use serde::{Deserialize, Serialize};

/// How the cursor wraps at the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// The window never wraps: stepping past the last full window restarts at
    /// the first one, and stepping back from the first jumps to the last full
    /// window. The cycle length is `len - window_size + 1`.
    #[default]
    Restart,
    /// The window reads the sequence cyclically, so every entry takes a turn
    /// at the front. The cycle length is `len`.
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    start: usize,
    window_size: usize,
    len: usize,
    wrap: WrapMode,
}

impl Carousel {
    /// An empty carousel. A zero window is treated as one.
    #[must_use]
    pub fn new(window_size: usize, wrap: WrapMode) -> Self {
        Self {
            start: 0,
            window_size: window_size.max(1),
            len: 0,
            wrap,
        }
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Number of entries currently shown.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.window_size.min(self.len)
    }

    /// ## Summary
    /// Adopts a new sequence length, pulling the cursor back into range.
    ///
    /// A cursor that no longer fits restarts at 0, the same rule a tick uses.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.start = self.clamp(self.start);
    }

    /// The carousel positioned at `start`, clamped by the wrap rule.
    #[must_use]
    pub fn at(mut self, start: usize) -> Self {
        self.start = self.clamp(start);
        self
    }

    /// Moves the window forward by one entry.
    pub fn advance(&mut self) {
        self.start = self.next_start();
    }

    /// Moves the window back by one entry.
    pub fn retreat(&mut self) {
        self.start = self.previous_start();
    }

    /// Cursor after one [`Carousel::advance`].
    #[must_use]
    pub fn next_start(&self) -> usize {
        if self.fits_whole() {
            return 0;
        }
        match self.wrap {
            WrapMode::Restart => {
                let next = self.start + 1;
                if next + self.window_size > self.len { 0 } else { next }
            }
            WrapMode::Rotate => (self.start + 1) % self.len,
        }
    }

    /// Cursor after one [`Carousel::retreat`].
    #[must_use]
    pub fn previous_start(&self) -> usize {
        if self.fits_whole() {
            return 0;
        }
        match (self.start, self.wrap) {
            (0, WrapMode::Restart) => self.len - self.window_size,
            (0, WrapMode::Rotate) => self.len - 1,
            (start, _) => start - 1,
        }
    }

    /// Indices of the visible entries, in display order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.visible_len()).map(move |offset| match self.wrap {
            WrapMode::Restart => self.start + offset,
            WrapMode::Rotate => (self.start + offset) % self.len,
        })
    }

    /// ## Summary
    /// The visible slice of `items`.
    ///
    /// `items` is expected to have the carousel's length; indices beyond a
    /// shorter slice are skipped rather than panicking.
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.indices().filter_map(|index| items.get(index)).collect()
    }

    const fn fits_whole(&self) -> bool {
        self.len <= self.window_size
    }

    fn clamp(&self, start: usize) -> usize {
        if self.fits_whole() {
            return 0;
        }
        match self.wrap {
            WrapMode::Restart if start + self.window_size > self.len => 0,
            WrapMode::Rotate if start >= self.len => 0,
            _ => start,
        }
    }
}
