//! SlidingKmerIndex: k-mer occurrences of a fixed-length window over one sequence.
//!
//! The window `[w, w+L)` moves right one offset per [`SlidingKmerIndex::advance`].
//! Each step evicts the k-mer starting at the old `w` and admits the k-mer
//! ending at the new right edge, so the trie only ever holds the k-mers of one
//! window and every step costs two O(k) trie operations.

use log::trace;
use thiserror::Error;

use crate::queue::PositionQueue;
use crate::tst::{OrderedTrie, TrieError};

/// Errors returned by SlidingKmerIndex.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// k must be at least 1.
    #[error("k-mer length must be > 0")]
    InvalidKmerLen,
    /// The window already starts at the last k-mer of the sequence.
    #[error("cannot advance window past offset {last} (window start {start}, k={k})")]
    WindowExhausted { start: usize, last: usize, k: usize },
    /// The k-mer leaving the window was not indexed at its own offset.
    #[error("k-mer at offset {offset} missing from the window index")]
    MissingKmer { offset: usize },
    /// Trie contract violation.
    #[error(transparent)]
    Trie(#[from] TrieError),
}

/// Trie of the k-mers in a sliding window, each mapped to its start offsets.
///
/// The index borrows the sequence it walks and owns its trie exclusively.
pub struct SlidingKmerIndex<'a> {
    seq: &'a [u8],
    k: usize,
    window_len: usize,
    start: usize,
    trie: OrderedTrie<PositionQueue>,
}

impl<'a> SlidingKmerIndex<'a> {
    /// Index the k-mers of the first window `seq[0..L)`.
    ///
    /// A window shorter than `k` (either `L < k` or a short sequence) yields an
    /// empty index rather than an error.
    pub fn build(seq: &'a [u8], k: usize, window_len: usize) -> Result<Self, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidKmerLen);
        }
        let mut idx = SlidingKmerIndex {
            seq,
            k,
            window_len,
            start: 0,
            trie: OrderedTrie::new(),
        };
        let span = window_len.min(seq.len());
        if span >= k {
            for pos in 0..=span - k {
                idx.admit(pos)?;
            }
        }
        trace!(
            "window index built: k={k}, L={window_len}, {} distinct k-mers",
            idx.trie.len()
        );
        Ok(idx)
    }

    /// Shift the window right by one offset.
    ///
    /// Fails without touching the index once the window start has reached the
    /// last k-mer of the sequence.
    pub fn advance(&mut self) -> Result<(), IndexError> {
        if !self.can_advance() {
            return Err(IndexError::WindowExhausted {
                start: self.start,
                last: self.seq.len().saturating_sub(self.k),
                k: self.k,
            });
        }
        let old = self.start;
        if self.window_len >= self.k {
            self.evict(old)?;
        }
        self.start = old + 1;

        // The new rightmost k-mer; none once the window overhangs the tail.
        if self.window_len >= self.k {
            let last = self.seq.len() - self.k;
            if let Some(pos) = self
                .start
                .checked_add(self.window_len - self.k)
                .filter(|&p| p <= last)
            {
                self.admit(pos)?;
            }
        }
        Ok(())
    }

    /// Offsets of `kmer` inside the current window, ascending.
    ///
    /// Strings whose length is not `k` are never indexed and return `None`.
    pub fn lookup(&self, kmer: &[u8]) -> Option<&PositionQueue> {
        if kmer.len() != self.k {
            return None;
        }
        // Length was checked above, so the key is non-empty.
        self.trie.get(kmer).ok().flatten()
    }

    /// True while another [`advance`](Self::advance) is allowed.
    #[inline]
    pub fn can_advance(&self) -> bool {
        self.seq
            .len()
            .checked_sub(self.k)
            .is_some_and(|last| self.start < last)
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// First offset of the current window.
    #[inline]
    pub fn window_start(&self) -> usize {
        self.start
    }

    /// One past the last offset of the current window, clamped to the sequence.
    #[inline]
    pub fn window_end(&self) -> usize {
        self.start.saturating_add(self.window_len).min(self.seq.len())
    }

    /// Number of distinct k-mers in the window.
    #[inline]
    pub fn distinct_kmers(&self) -> usize {
        self.trie.len()
    }

    /// Read-only view of the underlying trie.
    pub fn trie(&self) -> &OrderedTrie<PositionQueue> {
        &self.trie
    }

    fn kmer_at(&self, pos: usize) -> &'a [u8] {
        &self.seq[pos..pos + self.k]
    }

    fn admit(&mut self, pos: usize) -> Result<(), IndexError> {
        let kmer = self.kmer_at(pos);
        match self.trie.get_mut(kmer)? {
            Some(queue) => queue.push_back(pos),
            None => {
                self.trie.put(kmer, PositionQueue::with_first(pos))?;
            }
        }
        trace!("admit {pos}");
        Ok(())
    }

    fn evict(&mut self, pos: usize) -> Result<(), IndexError> {
        let kmer = self.kmer_at(pos);
        let queue = self
            .trie
            .get_mut(kmer)?
            .ok_or(IndexError::MissingKmer { offset: pos })?;
        if queue.front() != Some(pos) {
            return Err(IndexError::MissingKmer { offset: pos });
        }
        if queue.len() > 1 {
            queue.pop_front();
        } else {
            self.trie.delete(kmer)?;
        }
        trace!("evict {pos}");
        Ok(())
    }
}
