use crate::core::superposition::Transform;
use std::cmp::Ordering;

/// An aligned fragment pair: two equal-length windows, one per chain, that superpose well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Afp {
    pub start1: usize,
    pub start2: usize,
    pub len: usize,
    /// RMSD of the two windows after local superposition.
    pub rmsd: f64,
    /// Local contribution of the fragment to a chain score.
    pub score: f64,
    /// Transform mapping the chain-2 window onto the chain-1 window.
    pub transform: Transform,
}

impl Afp {
    /// One past the last chain-1 index covered by the fragment.
    #[inline]
    pub fn end1(&self) -> usize {
        self.start1 + self.len
    }

    #[inline]
    pub fn end2(&self) -> usize {
        self.start2 + self.len
    }

    /// Residue pairs `(i, j)` covered by the fragment, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len).map(move |k| (self.start1 + k, self.start2 + k))
    }

    /// Whether `next` may follow `self` in a chain: strictly after it in both chains.
    #[inline]
    pub fn precedes(&self, next: &Afp) -> bool {
        self.end1() <= next.start1 && self.end2() <= next.start2
    }

    /// Unaligned residues in each chain between `self` and a following fragment.
    #[inline]
    pub fn gaps_to(&self, next: &Afp) -> (usize, usize) {
        (next.start1 - self.end1(), next.start2 - self.end2())
    }

    /// Lexicographic order on `(start1, start2)`.
    pub fn position_cmp(&self, other: &Afp) -> Ordering {
        (self.start1, self.start2).cmp(&(other.start1, other.start2))
    }
}
