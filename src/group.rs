//! ValueGroup: the ordered per-key value storage.
//!
//! Every group in a blackboard carries the blackboard's drain mode, fixed
//! at construction. Values always enter at the tail; the mode decides which
//! end `take`/`peek` touch. One concrete type branching on the stored mode
//! replaces trait dispatch per call.

use std::collections::vec_deque;
use std::collections::VecDeque;

/// Drain order applied uniformly to every key of a blackboard.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// `take` removes the earliest remaining `put` (queue).
    Fifo,
    /// `take` removes the most recent remaining `put` (stack).
    Lifo,
}

#[derive(Debug)]
pub enum TakeError {
    Empty,
}

impl core::fmt::Display for TakeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TakeError::Empty => f.write_str("no values remain in the group"),
        }
    }
}

impl std::error::Error for TakeError {}

/// Ordered multiset of values for one key. Duplicate values are distinct
/// occurrences; each `put` is removable exactly once.
#[derive(Clone, Debug)]
pub struct ValueGroup<V> {
    mode: Mode,
    values: VecDeque<V>,
}

impl<V> ValueGroup<V> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            values: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Adds one value at the tail.
    pub fn put(&mut self, value: V) {
        self.values.push_back(value);
    }

    /// Removes and returns the next value per the group's mode.
    pub fn take(&mut self) -> Result<V, TakeError> {
        self.try_take().ok_or(TakeError::Empty)
    }

    /// Non-erroring form of [`take`](Self::take).
    pub fn try_take(&mut self) -> Option<V> {
        match self.mode {
            Mode::Fifo => self.values.pop_front(),
            Mode::Lifo => self.values.pop_back(),
        }
    }

    /// Borrows the value [`take`](Self::take) would remove next.
    pub fn peek(&self) -> Result<&V, TakeError> {
        self.try_peek().ok_or(TakeError::Empty)
    }

    /// Non-erroring form of [`peek`](Self::peek).
    pub fn try_peek(&self) -> Option<&V> {
        match self.mode {
            Mode::Fifo => self.values.front(),
            Mode::Lifo => self.values.back(),
        }
    }

    /// Iterates the remaining values in insertion order, oldest first,
    /// regardless of mode.
    pub fn iter(&self) -> vec_deque::Iter<'_, V> {
        self.values.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

impl<'a, V> IntoIterator for &'a ValueGroup<V> {
    type Item = &'a V;
    type IntoIter = vec_deque::Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
