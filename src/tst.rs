//! Ternary search trie over byte strings.
//!
//! Each node stores one symbol and routes by three-way comparison: `lo` for
//! smaller symbols at the same depth, `hi` for larger ones, `eq` to descend to
//! the next symbol of the key. The structure is not rebalanced; keys are short
//! (k-mers) and the alphabet is small, so depth stays bounded by `key.len()`
//! times the number of distinct symbols per level.
//!
//! Deletion rebuilds the visited path bottom-up: every recursive step hands the
//! (possibly collapsed) subtree back to the caller, which stores it into the
//! child slot it came from. A node left without a value and without an `eq`
//! subtree is replaced by its only side child, or dropped when it has none.
//!
//! The trie is exclusively owned by whoever holds it. It performs no internal
//! synchronization.

use std::cmp::Ordering;
use thiserror::Error;

/// Errors returned by [`OrderedTrie`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    /// Keys must contain at least one symbol.
    #[error("trie keys must be non-empty")]
    EmptyKey,
}

type Link<V> = Option<Box<Node<V>>>;

#[derive(Debug, Clone)]
struct Node<V> {
    symbol: u8,
    value: Option<V>,
    lo: Link<V>,
    eq: Link<V>,
    hi: Link<V>,
}

impl<V> Node<V> {
    fn new(symbol: u8) -> Self {
        Self {
            symbol,
            value: None,
            lo: None,
            eq: None,
            hi: None,
        }
    }
}

/// Mutable ternary trie mapping non-empty byte strings to values.
#[derive(Debug, Clone)]
pub struct OrderedTrie<V> {
    // Descend link of the sentinel root. The sentinel itself holds no symbol.
    root: Link<V>,
    len: usize,
}

impl<V> Default for OrderedTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedTrie<V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: &[u8], value: V) -> Result<Option<V>, TrieError> {
        check_key(key)?;
        let last = key.len() - 1;
        let mut link = &mut self.root;
        let mut depth = 0;
        loop {
            let node = link.get_or_insert_with(|| Box::new(Node::new(key[depth])));
            match key[depth].cmp(&node.symbol) {
                Ordering::Less => link = &mut node.lo,
                Ordering::Greater => link = &mut node.hi,
                Ordering::Equal if depth < last => {
                    depth += 1;
                    link = &mut node.eq;
                }
                Ordering::Equal => {
                    let old = node.value.replace(value);
                    if old.is_none() {
                        self.len += 1;
                    }
                    return Ok(old);
                }
            }
        }
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &[u8]) -> Result<Option<&V>, TrieError> {
        check_key(key)?;
        let last = key.len() - 1;
        let mut cur = self.root.as_deref();
        let mut depth = 0;
        while let Some(node) = cur {
            match key[depth].cmp(&node.symbol) {
                Ordering::Less => cur = node.lo.as_deref(),
                Ordering::Greater => cur = node.hi.as_deref(),
                Ordering::Equal if depth < last => {
                    depth += 1;
                    cur = node.eq.as_deref();
                }
                Ordering::Equal => return Ok(node.value.as_ref()),
            }
        }
        Ok(None)
    }

    /// Mutable access to the value stored under `key`, if any.
    pub fn get_mut(&mut self, key: &[u8]) -> Result<Option<&mut V>, TrieError> {
        check_key(key)?;
        let last = key.len() - 1;
        let mut cur = self.root.as_deref_mut();
        let mut depth = 0;
        while let Some(node) = cur {
            match key[depth].cmp(&node.symbol) {
                Ordering::Less => cur = node.lo.as_deref_mut(),
                Ordering::Greater => cur = node.hi.as_deref_mut(),
                Ordering::Equal if depth < last => {
                    depth += 1;
                    cur = node.eq.as_deref_mut();
                }
                Ordering::Equal => return Ok(node.value.as_mut()),
            }
        }
        Ok(None)
    }

    pub fn contains(&self, key: &[u8]) -> Result<bool, TrieError> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove `key` and prune the nodes that only served it.
    ///
    /// Deleting an absent key is a no-op and returns `Ok(None)`.
    pub fn delete(&mut self, key: &[u8]) -> Result<Option<V>, TrieError> {
        check_key(key)?;
        let mut removed = None;
        self.root = delete_rec(self.root.take(), key, 0, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of allocated nodes (routing nodes included).
    pub fn node_count(&self) -> usize {
        fn count<V>(link: &Link<V>) -> usize {
            match link {
                Some(n) => 1 + count(&n.lo) + count(&n.eq) + count(&n.hi),
                None => 0,
            }
        }
        count(&self.root)
    }

    /// All `(key, value)` pairs in ascending key order.
    pub fn entries(&self) -> Vec<(Vec<u8>, &V)> {
        let mut out = Vec::with_capacity(self.len);
        let mut prefix = Vec::new();
        collect(&self.root, &mut prefix, &mut out);
        out
    }
}

#[inline]
fn check_key(key: &[u8]) -> Result<(), TrieError> {
    if key.is_empty() {
        Err(TrieError::EmptyKey)
    } else {
        Ok(())
    }
}

fn delete_rec<V>(
    link: Link<V>,
    key: &[u8],
    depth: usize,
    removed: &mut Option<V>,
) -> Link<V> {
    let mut node = link?;
    match key[depth].cmp(&node.symbol) {
        Ordering::Less => node.lo = delete_rec(node.lo.take(), key, depth, removed),
        Ordering::Greater => node.hi = delete_rec(node.hi.take(), key, depth, removed),
        Ordering::Equal if depth + 1 < key.len() => {
            node.eq = delete_rec(node.eq.take(), key, depth + 1, removed)
        }
        Ordering::Equal => *removed = node.value.take(),
    }

    if node.value.is_none() && node.eq.is_none() {
        match (node.lo.take(), node.hi.take()) {
            (None, None) => return None,
            (Some(side), None) | (None, Some(side)) => return Some(side),
            (lo, hi) => {
                node.lo = lo;
                node.hi = hi;
            }
        }
    }
    Some(node)
}

// In-order walk: smaller symbols, this node (and its descendants), larger symbols.
fn collect<'a, V>(link: &'a Link<V>, prefix: &mut Vec<u8>, out: &mut Vec<(Vec<u8>, &'a V)>) {
    let Some(node) = link else { return };
    collect(&node.lo, prefix, out);
    prefix.push(node.symbol);
    if let Some(v) = &node.value {
        out.push((prefix.clone(), v));
    }
    collect(&node.eq, prefix, out);
    prefix.pop();
    collect(&node.hi, prefix, out);
}
