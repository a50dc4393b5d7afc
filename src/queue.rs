//! FIFO of k-mer start offsets stored as a trie value.

use std::collections::VecDeque;

/// Start offsets of one k-mer inside the current window, oldest first.
///
/// The sliding index only appends offsets larger than every offset already
/// queued, so FIFO order is also ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionQueue {
    offsets: VecDeque<usize>,
}

impl PositionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue holding a single offset.
    pub fn with_first(pos: usize) -> Self {
        let mut offsets = VecDeque::with_capacity(2);
        offsets.push_back(pos);
        Self { offsets }
    }

    #[inline]
    pub fn push_back(&mut self, pos: usize) {
        debug_assert!(self.offsets.back().is_none_or(|&last| last < pos));
        self.offsets.push_back(pos);
    }

    /// Remove and return the oldest offset.
    #[inline]
    pub fn pop_front(&mut self) -> Option<usize> {
        self.offsets.pop_front()
    }

    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.offsets.front().copied()
    }

    #[inline]
    pub fn back(&self) -> Option<usize> {
        self.offsets.back().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a PositionQueue {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::vec_deque::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter().copied()
    }
}

impl FromIterator<usize> for PositionQueue {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}
