//! Scan configuration and the multi-record driver.
//!
//! Records are independent: each one gets its own window index, and rayon
//! spreads records over worker threads. A single record is always scanned
//! sequentially.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::encode::{Alphabet, Pairing};
use crate::io::SequenceRecord;
use crate::locate::{LocateError, PalindromeMap, ReversePalindromeLocator};

/// Scan-time configuration.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    min_len: usize,
    max_len: usize,
    pairing: Pairing,
    threads: Option<usize>,
    min_record_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_len: 4,
            max_len: 12,
            pairing: Pairing::dna(),
            threads: None,
            min_record_len: 0,
        }
    }
}

impl ScanConfig {
    /// Shortest palindrome to report (also the index k-mer length).
    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = n;
        self
    }
    /// Longest palindrome to report (also the index window length).
    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = n;
        self
    }
    /// Use one of the built-in pairings.
    pub fn alphabet(mut self, a: Alphabet) -> Self {
        self.pairing = a.pairing();
        self
    }
    /// Use a custom pairing.
    pub fn pairing(mut self, p: Pairing) -> Self {
        self.pairing = p;
        self
    }
    /// Fix the number of threads used by rayon.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }
    /// Records shorter than this are skipped.
    pub fn min_record_len(mut self, n: usize) -> Self {
        self.min_record_len = n;
        self
    }

    /// Locator for these settings; fails on invalid length bounds.
    pub fn locator(&self) -> Result<ReversePalindromeLocator, LocateError> {
        Ok(ReversePalindromeLocator::new(self.min_len, self.max_len)?
            .with_pairing(self.pairing.clone()))
    }
}

/// Scan result for one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordHits {
    /// Record identifier.
    pub id: String,
    /// Sequence length.
    pub len: usize,
    /// Start offset (0-based) → palindrome lengths.
    pub hits: PalindromeMap,
}

impl RecordHits {
    pub fn match_count(&self) -> usize {
        self.hits.values().map(Vec::len).sum()
    }
}

/// Scan every record in parallel. Results keep the input order.
///
/// Skipped records (shorter than `min_record_len`) produce no entry. The first
/// failing record aborts the scan with an error naming it.
pub fn locate_records(
    records: &[SequenceRecord],
    cfg: &ScanConfig,
) -> Result<Vec<RecordHits>, LocateError> {
    let locator = cfg.locator()?;

    if let Some(n) = cfg.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok();
    }

    let kept: Vec<&SequenceRecord> = records
        .iter()
        .filter(|r| r.seq.len() >= cfg.min_record_len)
        .collect();
    if kept.len() < records.len() {
        debug!(
            "skipped {} records shorter than {}",
            records.len() - kept.len(),
            cfg.min_record_len
        );
    }

    let out: Vec<RecordHits> = kept
        .par_iter()
        .map(|rec| -> Result<RecordHits, LocateError> {
            let hits = locator
                .locate(&rec.seq)
                .map_err(|e| LocateError::Record {
                    id: rec.id.clone(),
                    source: Box::new(e),
                })?;
            debug!("record {}: {} start offsets", rec.id, hits.len());
            Ok(RecordHits {
                id: rec.id.clone(),
                len: rec.seq.len(),
                hits,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(out)
}
