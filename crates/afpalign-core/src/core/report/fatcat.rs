use super::format::{char_slice, java_scientific, line_chunks};
use super::LINE_WIDTH;
use crate::core::models::algorithm::SignificanceKind;
use crate::core::models::coords::CoordinateSet;
use crate::core::models::path::GAP_SYMBOL;
use crate::core::models::result::AlignmentResult;
use std::fmt::Write;

/// Renders the FatCat-style report. Positions are the residue numbers carried by the
/// coordinate sets.
pub fn render(result: &AlignmentResult, chain1: &CoordinateSet, chain2: &CoordinateSet) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Align {}.pdb {} with {}.pdb {}",
        result.name1(),
        result.len1(),
        result.name2(),
        result.len2()
    );
    if result.is_short() {
        text.push_str("Short match");
        return text;
    }

    let aln_len = result.aln_length();
    let gap_len = result.gap_len();
    let initial = result.initial();
    let _ = writeln!(
        text,
        "Twists {} ini-len {} ini-rmsd {:.2} opt-equ {} opt-rmsd {:.2} chain-rmsd {:.2} Score {:.2} align-len {} gaps {} ({:.2}%)",
        result.twists(),
        initial.aligned_len,
        initial.rmsd,
        result.nr_eqr(),
        result.total_rmsd(),
        initial.chain_rmsd,
        result.score(),
        aln_len,
        gap_len,
        100.0 * gap_len as f64 / aln_len as f64
    );

    match result.algorithm().significance() {
        SignificanceKind::ZScore => {
            let _ = write!(text, "Z-score {:.2} ", result.significance());
        }
        SignificanceKind::PValue => {
            let _ = write!(text, "P-value {} ", java_scientific(result.significance(), 2));
        }
    }
    let _ = writeln!(
        text,
        "Afp-num {} Identity {:.2}% Similarity {:.2}%",
        result.afp_count(),
        result.identity() * 100.0,
        result.similarity() * 100.0
    );

    let fragment_length = result.fragment_length() as f64;
    for (index, block) in result.blocks().iter().enumerate() {
        let gaps = block.gaps() as f64;
        let denominator = gaps + fragment_length * block.afp_count() as f64;
        let gap_fraction = if denominator > 0.0 { gaps / denominator } else { 0.0 };
        let _ = writeln!(
            text,
            "Block {:2} afp {:2} score {:5.2} rmsd {:5.2} gap {} ({:.2}%)",
            index,
            block.afp_count(),
            block.score(),
            block.rmsd(),
            block.gaps(),
            gap_fraction
        );
    }

    let gapped = result.path().gapped();
    let (mut ap, mut bp) = (gapped.begin1, gapped.begin2);
    for (start, len) in line_chunks(gapped.len(), LINE_WIDTH) {
        let a = char_slice(&gapped.seq1, start, len);
        let b = char_slice(&gapped.seq2, start, len);
        let c = char_slice(&gapped.symbols, start, len);

        text.push('\n');
        text.push_str(&ruler(len));
        let _ = write!(
            text,
            "\nChain 1:{:>5} {}\n{:14}{}\nChain 2:{:>5} {}\n",
            chain1.residue_number(ap),
            a,
            "",
            c,
            chain2.residue_number(bp),
            b
        );
        ap += a.chars().filter(|&ch| ch != GAP_SYMBOL).count();
        bp += b.chars().filter(|&ch| ch != GAP_SYMBOL).count();
    }
    text.push('\n');
    text.push_str(result.algorithm().report_note());
    text.push('\n');
    text
}

/// Column ruler over one alignment line: `.` every five columns, `:` every ten.
fn ruler(len: usize) -> String {
    let mut line = " ".repeat(14);
    let mut k = 10;
    while k <= len {
        line.push_str("    .    :");
        k += 10;
    }
    if k <= len + 5 {
        line.push_str("    .");
    }
    line
}
