//! Symbol pairing: complement lookup tables, reverse complement, palindrome checks.
//!
//! Conventions
//! - A [`Pairing`] is a 256-entry LUT: symbol byte → partner byte, [`UNMAPPED`] otherwise.
//! - Every built-in pairing is an involution (`complement(complement(b)) == b`).
//! - Symbols are matched exactly; callers upper-case their input first.

use thiserror::Error;

/// LUT marker for bytes outside the alphabet. Never a valid symbol.
pub const UNMAPPED: u8 = 0xFF;

/// Errors raised while building a pairing or applying it to a sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairingError {
    /// Sequence symbol outside the pairing's alphabet.
    #[error("symbol {:?} at offset {pos} has no complement", sym(.symbol))]
    Unmapped { symbol: u8, pos: usize },
    /// The pair list maps one symbol to two different partners.
    #[error(
        "pairing is not an involution: {:?} paired with both {:?} and {:?}",
        sym(.symbol),
        sym(.first),
        sym(.second)
    )]
    NotInvolution { symbol: u8, first: u8, second: u8 },
    /// The reserved LUT marker was used as a symbol.
    #[error("byte 0xFF is reserved and cannot be paired")]
    ReservedSymbol,
}

fn sym(b: &u8) -> char {
    char::from(*b)
}

const fn lut_from(pairs: &[(u8, u8)]) -> [u8; 256] {
    let mut t = [UNMAPPED; 256];
    let mut i = 0;
    while i < pairs.len() {
        let (a, b) = pairs[i];
        t[a as usize] = b;
        t[b as usize] = a;
        i += 1;
    }
    t
}

const DNA_PAIRS: [(u8, u8); 2] = [(b'A', b'T'), (b'C', b'G')];
const RNA_PAIRS: [(u8, u8); 2] = [(b'A', b'U'), (b'C', b'G')];
const IUPAC_PAIRS: [(u8, u8); 9] = [
    (b'A', b'T'),
    (b'C', b'G'),
    (b'R', b'Y'),
    (b'K', b'M'),
    (b'B', b'V'),
    (b'D', b'H'),
    (b'S', b'S'),
    (b'W', b'W'),
    (b'N', b'N'),
];

/// DNA complement LUT: A↔T, C↔G.
pub static DNA_LUT: [u8; 256] = lut_from(&DNA_PAIRS);
/// RNA complement LUT: A↔U, C↔G.
pub static RNA_LUT: [u8; 256] = lut_from(&RNA_PAIRS);
/// IUPAC nucleotide complement LUT (ambiguity codes included, S/W/N self-paired).
pub static IUPAC_LUT: [u8; 256] = lut_from(&IUPAC_PAIRS);

/// Built-in alphabets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alphabet {
    /// A, C, G, T.
    #[default]
    Dna,
    /// A, C, G, U.
    Rna,
    /// IUPAC nucleotide codes.
    Iupac,
}

impl Alphabet {
    pub fn pairing(self) -> Pairing {
        match self {
            Alphabet::Dna => Pairing::dna(),
            Alphabet::Rna => Pairing::rna(),
            Alphabet::Iupac => Pairing::iupac(),
        }
    }
}

/// A total involution over a small symbol set.
#[derive(Clone, PartialEq, Eq)]
pub struct Pairing {
    lut: [u8; 256],
}

impl std::fmt::Debug for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols: String = self.symbols().map(char::from).collect();
        f.debug_struct("Pairing").field("symbols", &symbols).finish()
    }
}

impl Default for Pairing {
    fn default() -> Self {
        Self::dna()
    }
}

impl Pairing {
    pub fn dna() -> Self {
        Self { lut: DNA_LUT }
    }

    pub fn rna() -> Self {
        Self { lut: RNA_LUT }
    }

    pub fn iupac() -> Self {
        Self { lut: IUPAC_LUT }
    }

    /// Build a pairing from symbol pairs. `(x, x)` declares a self-complementary symbol.
    ///
    /// Repeating a pair is allowed; pairing a symbol with two different partners is not.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self, PairingError> {
        let mut lut = [UNMAPPED; 256];
        for &(a, b) in pairs {
            if a == UNMAPPED || b == UNMAPPED {
                return Err(PairingError::ReservedSymbol);
            }
            for (x, y) in [(a, b), (b, a)] {
                let cur = lut[x as usize];
                if cur != UNMAPPED && cur != y {
                    return Err(PairingError::NotInvolution {
                        symbol: x,
                        first: cur,
                        second: y,
                    });
                }
                lut[x as usize] = y;
            }
        }
        Ok(Self { lut })
    }

    /// Partner of `b`, or `None` if `b` is outside the alphabet.
    #[inline]
    pub fn complement(&self, b: u8) -> Option<u8> {
        let v = self.lut[b as usize];
        if v == UNMAPPED { None } else { Some(v) }
    }

    /// Symbols of the alphabet, ascending.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..=254).filter(move |&b| self.lut[b as usize] != UNMAPPED)
    }

    /// Check every symbol of `seq`; reports the first one without a partner.
    pub fn validate(&self, seq: &[u8]) -> Result<(), PairingError> {
        match seq
            .iter()
            .position(|&b| self.lut[b as usize] == UNMAPPED)
        {
            Some(pos) => Err(PairingError::Unmapped {
                symbol: seq[pos],
                pos,
            }),
            None => Ok(()),
        }
    }

    /// Reverse complement of `seq`.
    pub fn revcomp(&self, seq: &[u8]) -> Result<Vec<u8>, PairingError> {
        let mut out = Vec::with_capacity(seq.len());
        self.revcomp_into(seq, &mut out)?;
        Ok(out)
    }

    /// Reverse complement into a reusable buffer (cleared first).
    pub fn revcomp_into(&self, seq: &[u8], out: &mut Vec<u8>) -> Result<(), PairingError> {
        out.clear();
        for (i, &b) in seq.iter().enumerate().rev() {
            match self.complement(b) {
                Some(c) => out.push(c),
                None => return Err(PairingError::Unmapped { symbol: b, pos: i }),
            }
        }
        Ok(())
    }

    /// True iff `seq` equals its own reverse complement. Unmapped symbols never match.
    pub fn is_reverse_palindrome(&self, seq: &[u8]) -> bool {
        self.mirrored_from(seq, 0)
    }

    /// Compare mirrored pairs `(t, len-1-t)` for `t` in `[skip, ceil(len/2))`.
    ///
    /// The outer `skip` pairs are assumed to be verified already.
    #[inline]
    pub(crate) fn mirrored_from(&self, seq: &[u8], skip: usize) -> bool {
        let n = seq.len();
        (skip..n.div_ceil(2)).all(|t| {
            let c = self.lut[seq[t] as usize];
            c != UNMAPPED && c == seq[n - 1 - t]
        })
    }
}
