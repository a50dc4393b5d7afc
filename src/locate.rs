//! Reverse-palindrome scan over a sliding k-mer index.
//!
//! With `k = min_len` and window `L = max_len`, every reverse palindrome
//! `s[i..i+len)` with `min_len <= len <= max_len` ends with a k-mer equal to the
//! reverse complement of `s[i..i+k)`, and that k-mer starts inside the window
//! `[i, i+L)`. Looking the reverse complement up in the index therefore yields
//! all candidate end points for start `i`; only the inner pairs remain to be
//! checked.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::encode::{Pairing, PairingError};
use crate::index::{IndexError, SlidingKmerIndex};

/// Scan offset (0-based) → accepted lengths, in order of discovery.
pub type PalindromeMap = BTreeMap<usize, Vec<usize>>;

/// One reverse palindrome: `seq[start..start + len)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PalindromeMatch {
    /// Start offset (0-based).
    pub start: usize,
    /// Length in symbols.
    pub len: usize,
}

/// Errors returned by the locator and the record driver.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Length bounds must satisfy `0 < min_len <= max_len`.
    #[error("invalid length bounds: min_len={min_len}, max_len={max_len}")]
    InvalidBounds { min_len: usize, max_len: usize },
    /// Sequence symbol without a complement.
    #[error(transparent)]
    Pairing(#[from] PairingError),
    /// Window index failure.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Failure while scanning a named record.
    #[error("record {id}: {source}")]
    Record {
        id: String,
        #[source]
        source: Box<LocateError>,
    },
}

/// Finds reverse palindromes with lengths in `[min_len, max_len]`.
#[derive(Clone, Debug)]
pub struct ReversePalindromeLocator {
    min_len: usize,
    max_len: usize,
    pairing: Pairing,
}

impl ReversePalindromeLocator {
    /// Locator with the DNA pairing. Rejects `min_len == 0` and `min_len > max_len`.
    pub fn new(min_len: usize, max_len: usize) -> Result<Self, LocateError> {
        if min_len == 0 || min_len > max_len {
            return Err(LocateError::InvalidBounds { min_len, max_len });
        }
        Ok(Self {
            min_len,
            max_len,
            pairing: Pairing::dna(),
        })
    }

    pub fn with_pairing(mut self, pairing: Pairing) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    /// All reverse palindromes of `seq`, grouped by start offset.
    ///
    /// The sequence is validated against the pairing before any scanning.
    pub fn locate(&self, seq: &[u8]) -> Result<PalindromeMap, LocateError> {
        self.pairing.validate(seq)?;

        let k = self.min_len;
        let mut out = PalindromeMap::new();
        if seq.len() < k {
            return Ok(out);
        }

        let mut index = SlidingKmerIndex::build(seq, k, self.max_len)?;
        let last = seq.len() - k;
        let mut rc = Vec::with_capacity(k);
        for i in 0..=last {
            self.pairing.revcomp_into(&seq[i..i + k], &mut rc)?;
            if let Some(candidates) = index.lookup(&rc) {
                let lengths: Vec<usize> = candidates
                    .iter()
                    .filter_map(|j| {
                        let len = (j + k).checked_sub(i)?;
                        (self.min_len..=self.max_len)
                            .contains(&len)
                            .then_some(len)
                    })
                    .filter(|&len| self.pairing.mirrored_from(&seq[i..i + len], k))
                    .collect();
                if !lengths.is_empty() {
                    out.insert(i, lengths);
                }
            }
            if i < last {
                index.advance()?;
            }
        }
        debug!(
            "scanned {} symbols (k={k}, L={}): {} start offsets with matches",
            seq.len(),
            self.max_len,
            out.len()
        );
        Ok(out)
    }

    /// Same as [`locate`](Self::locate), flattened and ordered by `(start, len)`.
    pub fn matches(&self, seq: &[u8]) -> Result<Vec<PalindromeMatch>, LocateError> {
        Ok(flatten(&self.locate(seq)?))
    }
}

/// Reverse palindromes of a DNA sequence with lengths in `[min_len, max_len]`.
pub fn locate(seq: &[u8], min_len: usize, max_len: usize) -> Result<PalindromeMap, LocateError> {
    ReversePalindromeLocator::new(min_len, max_len)?.locate(seq)
}

/// Expand a [`PalindromeMap`] into individual matches.
pub fn flatten(map: &PalindromeMap) -> Vec<PalindromeMatch> {
    map.iter()
        .flat_map(|(&start, lens)| lens.iter().map(move |&len| PalindromeMatch { start, len }))
        .collect()
}
