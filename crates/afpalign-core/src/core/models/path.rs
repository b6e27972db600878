use super::block::Block;
use super::coords::CoordinateSet;
use super::residue::{is_identical, is_similar};

pub const GAP_SYMBOL: char = '-';

/// How the middle line of a gapped alignment marks aligned columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolStyle {
    /// `|` for identical residues, `:` for similar ones.
    Identity,
    /// The 1-based index of the block the column belongs to, as one base-36 digit
    /// (`1`..`9`, then `a`..`z`). Blocks past the 35th are marked `*`.
    BlockIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub block: usize,
    pub pos1: usize,
    pub pos2: usize,
}

/// Column-wise rendering of an alignment, from its first to its last aligned pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GappedAlignment {
    pub seq1: String,
    pub seq2: String,
    pub symbols: String,
    /// 0-based chain-1 index of the first column.
    pub begin1: usize,
    /// 0-based chain-2 index of the first column.
    pub begin2: usize,
}

impl GappedAlignment {
    /// Number of columns.
    pub fn len(&self) -> usize {
        self.seq1.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Number of columns holding a gap in either sequence.
    pub fn gap_count(&self) -> usize {
        self.seq1
            .chars()
            .zip(self.seq2.chars())
            .filter(|&(a, b)| a == GAP_SYMBOL || b == GAP_SYMBOL)
            .count()
    }
}

/// The optimal alignment: every aligned pair tagged with its block, plus the gapped text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentPath {
    pairs: Vec<AlignedPair>,
    gapped: GappedAlignment,
}

impl AlignmentPath {
    pub fn build(
        blocks: &[Block],
        chain1: &CoordinateSet,
        chain2: &CoordinateSet,
        style: SymbolStyle,
    ) -> Self {
        let pairs: Vec<AlignedPair> = blocks
            .iter()
            .enumerate()
            .flat_map(|(block, b)| b.pairs().map(move |(pos1, pos2)| AlignedPair { block, pos1, pos2 }))
            .collect();

        let Some(first) = pairs.first() else {
            return Self::default();
        };

        let mut gapped = GappedAlignment {
            begin1: first.pos1,
            begin2: first.pos2,
            ..GappedAlignment::default()
        };

        let mut previous: Option<&AlignedPair> = None;
        for pair in &pairs {
            if let Some(prev) = previous {
                for i in (prev.pos1 + 1)..pair.pos1 {
                    gapped.seq1.push(chain1.code(i));
                    gapped.seq2.push(GAP_SYMBOL);
                    gapped.symbols.push(' ');
                }
                for j in (prev.pos2 + 1)..pair.pos2 {
                    gapped.seq1.push(GAP_SYMBOL);
                    gapped.seq2.push(chain2.code(j));
                    gapped.symbols.push(' ');
                }
            }
            let a = chain1.code(pair.pos1);
            let b = chain2.code(pair.pos2);
            gapped.seq1.push(a);
            gapped.seq2.push(b);
            gapped.symbols.push(column_symbol(style, pair.block, a, b));
            previous = Some(pair);
        }

        Self { pairs, gapped }
    }

    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    pub fn gapped(&self) -> &GappedAlignment {
        &self.gapped
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn column_symbol(style: SymbolStyle, block: usize, a: char, b: char) -> char {
    match style {
        SymbolStyle::Identity if is_identical(a, b) => '|',
        SymbolStyle::Identity if is_similar(a, b) => ':',
        SymbolStyle::Identity => ' ',
        SymbolStyle::BlockIndex => {
            u32::try_from(block + 1)
                .ok()
                .and_then(|index| std::char::from_digit(index, 36))
                .unwrap_or('*')
        }
    }
}
