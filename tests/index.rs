use revp_kmer_indexer::{IndexError, SlidingKmerIndex};
use std::collections::BTreeMap;

/// Brute-force occurrences of every k-mer starting in `[start, start+L-k]`.
fn window_kmers(seq: &[u8], k: usize, l: usize, start: usize) -> BTreeMap<Vec<u8>, Vec<usize>> {
    let mut m = BTreeMap::<Vec<u8>, Vec<usize>>::new();
    let end = (start + l).min(seq.len());
    let mut p = start;
    while p + k <= end {
        m.entry(seq[p..p + k].to_vec()).or_default().push(p);
        p += 1;
    }
    m
}

fn index_kmers(idx: &SlidingKmerIndex<'_>) -> BTreeMap<Vec<u8>, Vec<usize>> {
    idx.trie()
        .entries()
        .into_iter()
        .map(|(k, q)| (k, q.to_vec()))
        .collect()
}

#[test]
fn test_build_first_window() {
    let seq = b"ACGTACGTAC";
    let idx = SlidingKmerIndex::build(seq, 2, 6).unwrap();
    assert_eq!(idx.window_start(), 0);
    assert_eq!(idx.window_end(), 6);
    assert_eq!(idx.lookup(b"AC").unwrap().to_vec(), vec![0, 4]);
    assert_eq!(idx.lookup(b"CG").unwrap().to_vec(), vec![1]);
    assert!(idx.lookup(b"GA").is_none());
    // offset 4 is the last full 2-mer inside [0, 6)
    assert!(idx.lookup(b"CG").unwrap().iter().all(|p| p <= 4));
    assert_eq!(idx.distinct_kmers(), 4);
    assert_eq!(index_kmers(&idx), window_kmers(seq, 2, 6, 0));
}

#[test]
fn test_lookup_wrong_length_is_absent() {
    let idx = SlidingKmerIndex::build(b"ACGTACGT", 3, 5).unwrap();
    assert!(idx.lookup(b"").is_none());
    assert!(idx.lookup(b"AC").is_none());
    assert!(idx.lookup(b"ACGT").is_none());
    assert!(idx.lookup(b"ACG").is_some());
}

#[test]
fn test_advance_evicts_and_admits() {
    let seq = b"AAAACAAAA";
    let mut idx = SlidingKmerIndex::build(seq, 2, 4).unwrap();
    assert_eq!(idx.lookup(b"AA").unwrap().to_vec(), vec![0, 1, 2]);

    idx.advance().unwrap();
    assert_eq!(idx.window_start(), 1);
    assert_eq!(idx.lookup(b"AA").unwrap().to_vec(), vec![1, 2]);
    assert_eq!(idx.lookup(b"AC").unwrap().to_vec(), vec![3]);

    idx.advance().unwrap();
    idx.advance().unwrap();
    // window [3, 7): AC CA AA
    assert_eq!(idx.lookup(b"AA").unwrap().to_vec(), vec![5]);
    assert_eq!(idx.lookup(b"CA").unwrap().to_vec(), vec![4]);

    idx.advance().unwrap();
    // last occurrence of AC left the window: key deleted
    assert!(idx.lookup(b"AC").is_none());
    assert_eq!(index_kmers(&idx), window_kmers(seq, 2, 4, 4));
}

#[test]
fn test_tail_evicts_only_until_exhausted() {
    let seq = b"GATTACA";
    let (k, l) = (3, 5);
    let mut idx = SlidingKmerIndex::build(seq, k, l).unwrap();
    let mut steps = 0;
    while idx.can_advance() {
        idx.advance().unwrap();
        steps += 1;
        assert_eq!(
            index_kmers(&idx),
            window_kmers(seq, k, l, idx.window_start()),
            "window start {}",
            idx.window_start()
        );
    }
    assert_eq!(steps, seq.len() - k);
    assert_eq!(idx.window_start(), 4);
    assert_eq!(idx.distinct_kmers(), 1);
    assert_eq!(idx.lookup(b"ACA").unwrap().to_vec(), vec![4]);

    let err = idx.advance().unwrap_err();
    assert_eq!(
        err,
        IndexError::WindowExhausted {
            start: 4,
            last: 4,
            k: 3
        }
    );
    // rejected call leaves the index untouched
    assert_eq!(idx.window_start(), 4);
    assert_eq!(idx.lookup(b"ACA").unwrap().to_vec(), vec![4]);
}

#[test]
fn test_short_sequence_and_short_window() {
    // sequence shorter than the window: truncated, not an error
    let idx = SlidingKmerIndex::build(b"ACGTA", 2, 50).unwrap();
    assert_eq!(idx.window_end(), 5);
    assert_eq!(idx.distinct_kmers(), 4);

    // sequence shorter than k: empty and cannot advance
    let mut idx = SlidingKmerIndex::build(b"AC", 3, 5).unwrap();
    assert_eq!(idx.distinct_kmers(), 0);
    assert!(!idx.can_advance());
    assert!(matches!(
        idx.advance(),
        Err(IndexError::WindowExhausted { .. })
    ));

    // window shorter than k: never holds a k-mer
    let mut idx = SlidingKmerIndex::build(b"ACGTACGT", 4, 3).unwrap();
    assert_eq!(idx.distinct_kmers(), 0);
    while idx.can_advance() {
        idx.advance().unwrap();
        assert_eq!(idx.distinct_kmers(), 0);
    }
}

#[test]
fn test_zero_k_rejected() {
    assert!(matches!(
        SlidingKmerIndex::build(b"ACGT", 0, 4),
        Err(IndexError::InvalidKmerLen)
    ));
}

#[test]
fn test_window_equal_to_k() {
    let seq = b"ACGTTGCA";
    let mut idx = SlidingKmerIndex::build(seq, 3, 3).unwrap();
    loop {
        let w = idx.window_start();
        assert_eq!(idx.distinct_kmers(), 1);
        assert_eq!(idx.lookup(&seq[w..w + 3]).unwrap().to_vec(), vec![w]);
        if !idx.can_advance() {
            break;
        }
        idx.advance().unwrap();
    }
}

#[test]
fn test_huge_window_is_clamped_to_sequence() {
    let seq = b"TCAATGCATGCGGGTCTATATGCAT";
    for l in [usize::MAX, usize::MAX - 2] {
        let mut idx = SlidingKmerIndex::build(seq, 4, l).unwrap();
        assert_eq!(idx.window_end(), seq.len());
        loop {
            let w = idx.window_start();
            assert_eq!(idx.window_end(), seq.len());
            assert_eq!(index_kmers(&idx), window_kmers(seq, 4, seq.len(), w));
            if !idx.can_advance() {
                break;
            }
            idx.advance().unwrap();
        }
        assert!(matches!(idx.advance(), Err(IndexError::WindowExhausted { .. })));
    }
}

#[test]
fn test_huge_k_cannot_advance() {
    let mut idx = SlidingKmerIndex::build(b"ACGT", usize::MAX, usize::MAX).unwrap();
    assert_eq!(idx.distinct_kmers(), 0);
    assert!(!idx.can_advance());
    assert!(matches!(idx.advance(), Err(IndexError::WindowExhausted { .. })));
}
