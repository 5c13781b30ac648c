//! Command history ring with recall navigation.
//!
//! Uses stub type pattern - struct always exists, but behavior is feature-gated.
//!
//! The ring remembers the last `depth` submitted lines. Recall walks from the newest
//! entry towards the oldest and stops there; stepping forward past the newest entry
//! restores the line that was being typed when recall started.

#![cfg_attr(not(feature = "history"), allow(unused_variables))]

#[cfg(not(feature = "history"))]
use core::marker::PhantomData;

/// Command history storage.
///
/// When `history` feature is enabled, stores up to `N` lines of `INPUT_SIZE` bytes.
/// When disabled, zero-size stub that no-ops all operations.
#[derive(Debug)]
pub struct CommandHistory<const N: usize, const INPUT_SIZE: usize> {
    #[cfg(feature = "history")]
    slots: [heapless::String<INPUT_SIZE>; N],

    /// Next slot to write
    #[cfg(feature = "history")]
    head: usize,

    /// Number of remembered lines
    #[cfg(feature = "history")]
    len: usize,

    /// Runtime ring size (at most N)
    #[cfg(feature = "history")]
    depth: usize,

    /// Recall position (0 = newest) while navigating
    #[cfg(feature = "history")]
    position: Option<usize>,

    /// Line being typed when recall started
    #[cfg(feature = "history")]
    stash: heapless::String<INPUT_SIZE>,

    #[cfg(not(feature = "history"))]
    _phantom: PhantomData<[u8; INPUT_SIZE]>,
}

impl<const N: usize, const INPUT_SIZE: usize> CommandHistory<N, INPUT_SIZE> {
    /// Create a history using all `N` slots.
    pub fn new() -> Self {
        Self::with_depth(N)
    }

    /// Create a history remembering `depth` lines (clamped to `N`).
    #[cfg(feature = "history")]
    pub fn with_depth(depth: usize) -> Self {
        Self {
            slots: core::array::from_fn(|_| heapless::String::new()),
            head: 0,
            len: 0,
            depth: depth.min(N),
            position: None,
            stash: heapless::String::new(),
        }
    }

    /// Create a history (stub version).
    #[cfg(not(feature = "history"))]
    pub fn with_depth(depth: usize) -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Record a submitted line, overwriting the oldest entry when full.
    #[cfg(feature = "history")]
    pub fn add(&mut self, line: &str) {
        self.position = None;
        if line.is_empty() || self.depth == 0 {
            return;
        }

        let slot = &mut self.slots[self.head];
        slot.clear();
        crate::util::push_bounded(slot, line);

        self.head = (self.head + 1) % self.depth;
        self.len = (self.len + 1).min(self.depth);
    }

    /// Record a submitted line (stub version - no-op).
    #[cfg(not(feature = "history"))]
    pub fn add(&mut self, line: &str) {
        // No-op
    }

    /// Step to the next older line.
    ///
    /// `current` is the live line, kept for when navigation returns past the newest
    /// entry. Returns `None` once the oldest entry has been reached.
    #[cfg(feature = "history")]
    pub fn previous(&mut self, current: &str) -> Option<heapless::String<INPUT_SIZE>> {
        let pos = match self.position {
            None if self.len == 0 => return None,
            None => {
                self.stash.clear();
                crate::util::push_bounded(&mut self.stash, current);
                0
            }
            Some(p) if p + 1 >= self.len => return None,
            Some(p) => p + 1,
        };

        self.position = Some(pos);
        Some(self.entry(pos).clone())
    }

    /// Step to the next older line (stub version - returns None).
    #[cfg(not(feature = "history"))]
    pub fn previous(&mut self, current: &str) -> Option<heapless::String<INPUT_SIZE>> {
        None
    }

    /// Step to the next newer line, or back to the stashed live line.
    #[cfg(feature = "history")]
    pub fn next(&mut self) -> Option<heapless::String<INPUT_SIZE>> {
        match self.position? {
            0 => {
                self.position = None;
                Some(core::mem::take(&mut self.stash))
            }
            p => {
                self.position = Some(p - 1);
                Some(self.entry(p - 1).clone())
            }
        }
    }

    /// Step to the next newer line (stub version - returns None).
    #[cfg(not(feature = "history"))]
    pub fn next(&mut self) -> Option<heapless::String<INPUT_SIZE>> {
        None
    }

    /// Reset navigation position.
    #[cfg(feature = "history")]
    pub fn reset_position(&mut self) {
        self.position = None;
    }

    /// Reset navigation position (stub version - no-op).
    #[cfg(not(feature = "history"))]
    pub fn reset_position(&mut self) {
        // No-op
    }

    /// Number of remembered lines.
    #[cfg(feature = "history")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of remembered lines (stub version - always 0).
    #[cfg(not(feature = "history"))]
    pub fn len(&self) -> usize {
        0
    }

    /// Check whether no line is remembered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry `age` steps back from the newest (0 = newest).
    #[cfg(feature = "history")]
    fn entry(&self, age: usize) -> &heapless::String<INPUT_SIZE> {
        &self.slots[(self.head + self.depth - 1 - age) % self.depth]
    }
}

impl<const N: usize, const INPUT_SIZE: usize> Default for CommandHistory<N, INPUT_SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
