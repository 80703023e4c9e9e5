//! Growable bit-vectors used as adjacency rows.
//!
//! Bit `k + 1` of a row says "this candidate intercepts shot k". Bit 0 is a
//! sentinel that is always set in a populated row, so a candidate blocking
//! zero shots (sentinel only) is distinguishable from an unset row. The
//! dominance target is the all-ones value over `nb_shots + 1` bits, which is
//! always odd.

const WORD_BITS: usize = 64;

/// Fixed-width bit-vector over `u64` words. All rows of one graph share the
/// same width (`nb_shots + 1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitRow {
    words: Vec<u64>,
    len: usize,
}

impl BitRow {
    /// All-zero row of `len` bits.
    pub fn zeros(len: usize) -> Self {
        let n = len.div_ceil(WORD_BITS);
        Self {
            words: vec![0; n.max(1)],
            len: len.max(1),
        }
    }

    /// Row with only the sentinel bit set.
    pub fn sentinel(len: usize) -> Self {
        let mut row = Self::zeros(len);
        row.set(0);
        row
    }

    /// All `len` bits set; this is the dominance target for a graph with
    /// `len - 1` shots.
    pub fn full(len: usize) -> Self {
        let mut row = Self::zeros(len);
        for k in 0..row.len {
            row.set(k);
        }
        row
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn set(&mut self, k: usize) {
        debug_assert!(k < self.len);
        self.words[k / WORD_BITS] |= 1u64 << (k % WORD_BITS);
    }

    #[inline]
    pub fn get(&self, k: usize) -> bool {
        debug_assert!(k < self.len);
        self.words[k / WORD_BITS] & (1u64 << (k % WORD_BITS)) != 0
    }

    pub fn union_assign(&mut self, other: &BitRow) {
        debug_assert_eq!(self.len, other.len);
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    pub fn union(&self, other: &BitRow) -> BitRow {
        let mut out = self.clone();
        out.union_assign(other);
        out
    }

    /// Clear every bit that `covered` has, keeping the sentinel. Used by the
    /// greedy solver to strip newly covered shots from the remaining rows
    /// without corrupting the populated marker.
    pub fn clear_covered(&mut self, covered: &BitRow) {
        debug_assert_eq!(self.len, covered.len);
        for (w, c) in self.words.iter_mut().zip(&covered.words) {
            *w &= !c;
        }
        self.set(0);
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of shots this row blocks (popcount minus the sentinel).
    #[inline]
    pub fn degree(&self) -> usize {
        self.count_ones().saturating_sub(1)
    }

    pub fn is_subset_of(&self, other: &BitRow) -> bool {
        debug_assert_eq!(self.len, other.len);
        self.words.iter().zip(&other.words).all(|(w, o)| w & !o == 0)
    }

    /// Only the sentinel is set: the candidate blocks nothing.
    pub fn is_sentinel_only(&self) -> bool {
        self.get(0) && self.count_ones() == 1
    }

    /// Numeric value for rows of at most 128 bits. Handy in tests for
    /// asserting the `2^(nb_shots+1) - 1` shape of the dominance target.
    pub fn to_u128(&self) -> Option<u128> {
        if self.len > 128 {
            return None;
        }
        let lo = self.words[0] as u128;
        let hi = if self.words.len() > 1 {
            (self.words[1] as u128) << 64
        } else {
            0
        };
        Some(lo | hi)
    }
}
