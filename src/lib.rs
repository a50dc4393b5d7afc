//! Reverse-palindrome (restriction-site) locator in modern Rust (edition 2024).
//!
//! Building blocks:
//! - [`OrderedTrie`]: ternary search trie with delete-time node collapsing
//! - [`SlidingKmerIndex`]: k-mer → offsets for a window that slides one offset per step
//! - [`ReversePalindromeLocator`]: finds every substring equal to its own reverse
//!   complement with length in `[min_len, max_len]`
//! - [`Pairing`]: complement tables (DNA, RNA, IUPAC or custom involutions)
//!
//! Offsets in the library API are 0-based. The TSV report written by
//! [`ReportWriter`] uses 1-based starts.
//!
//! Each record is scanned sequentially; [`locate_records`] parallelises
//! across records only.

mod builder;
pub mod encode;
mod index;
mod io;
mod locate;
mod queue;
pub mod tst;

pub use builder::{RecordHits, ScanConfig, locate_records};
pub use encode::{Alphabet, Pairing, PairingError};
pub use index::{IndexError, SlidingKmerIndex};
pub use io::{ReportFormat, ReportWriter, SequenceRecord, read_records};
pub use locate::{
    LocateError, PalindromeMap, PalindromeMatch, ReversePalindromeLocator, flatten, locate,
};
pub use queue::PositionQueue;
pub use tst::{OrderedTrie, TrieError};
