use super::format::{char_slice, line_chunks};
use super::rotation::rotation_operators;
use super::LINE_WIDTH;
use crate::core::models::path::GAP_SYMBOL;
use crate::core::models::result::AlignmentResult;
use std::fmt::Write;

/// Renders the CE-style report.
///
/// Positions are 1-based sequential indices. `cpu_ms` is reported verbatim; it is not part
/// of the result so that results stay reproducible.
pub fn render(result: &AlignmentResult, cpu_ms: u128) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Chain 1: {} (Size={})", result.name1(), result.len1());
    let _ = writeln!(text, "Chain 2: {} (Size={})", result.name2(), result.len2());
    text.push('\n');

    let opt_len = result.nr_eqr();
    let gap_len = result.gap_len();
    let _ = write!(
        text,
        "Alignment length = {} Rmsd = {:.2}A Z-Score = {:.1}",
        opt_len,
        result.total_rmsd(),
        result.significance()
    );
    let _ = write!(
        text,
        " Gaps = {}({:.1}%) CPU = {} ms. Sequence identities = {:.1}%",
        gap_len,
        gap_len as f64 * 100.0 / opt_len as f64,
        cpu_ms,
        result.identity() * 100.0
    );

    let gapped = result.path().gapped();
    let (mut ap, mut bp) = (gapped.begin1, gapped.begin2);
    for (start, len) in line_chunks(gapped.len(), LINE_WIDTH) {
        let a = char_slice(&gapped.seq1, start, len);
        let b = char_slice(&gapped.seq2, start, len);
        let _ = write!(
            text,
            "\nChain 1:{:>5} {}\nChain 2:{:>5} {}\n",
            ap + 1,
            a,
            bp + 1,
            b
        );
        ap += a.chars().filter(|&c| c != GAP_SYMBOL).count();
        bp += b.chars().filter(|&c| c != GAP_SYMBOL).count();
    }
    text.push('\n');
    text.push_str(&rotation_operators(result));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::algorithm::Algorithm;
    use crate::core::models::block::Block;
    use crate::core::models::coords::CoordinateSet;
    use crate::core::models::residue::ResidueLabel;
    use crate::core::models::result::{AlignmentParts, InitialChain, OptimizationTrace};
    use crate::core::scoring::ScoreWeights;
    use nalgebra::Point3;

    fn chain(name: &str, n: usize) -> CoordinateSet {
        let codes = "ACDEFGHIKLMNPQRSTVWY";
        let points = (0..n)
            .map(|i| {
                let t = i as f64;
                Point3::new(3.3 * t, (t * 1.3).sin() * 2.0, (t * 0.7).cos() * 2.0)
            })
            .collect();
        let labels = (0..n)
            .map(|i| ResidueLabel::new(codes.as_bytes()[i % 20] as char, (i + 1).to_string()))
            .collect();
        CoordinateSet::new(name, points, labels).unwrap()
    }

    fn ce_result(
        c1: &CoordinateSet,
        c2: &CoordinateSet,
        ranges: &[(usize, usize, usize)],
    ) -> AlignmentResult {
        let blocks = ranges
            .iter()
            .map(|&(s1, s2, len)| {
                Block::build(
                    c1,
                    c2,
                    (s1..s1 + len).collect(),
                    (s2..s2 + len).collect(),
                    vec![],
                    &ScoreWeights::default(),
                )
                .unwrap()
            })
            .collect();
        let parts = AlignmentParts {
            algorithm: Algorithm::Ce,
            afp_count: 4,
            fragment_length: 8,
            initial: InitialChain::default(),
            blocks,
            score: 42.0,
            total_rmsd: 1.234,
            significance: 4.56,
            trace: OptimizationTrace::default(),
        };
        AlignmentResult::assemble(parts, c1, c2)
    }

    fn printed_starts(report: &str, prefix: &str) -> Vec<usize> {
        report
            .lines()
            .filter_map(|line| line.strip_prefix(prefix))
            .filter_map(|rest| rest.get(..5)?.trim().parse::<usize>().ok())
            .collect()
    }

    #[test]
    fn header_and_statistics_line_follow_fixed_layout() {
        let c1 = chain("1abc.A", 30);
        let c2 = chain("2xyz.B", 30);
        let result = ce_result(&c1, &c2, &[(0, 0, 10), (14, 14, 10)]);
        let report = render(&result, 17);
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Chain 1: 1abc.A (Size=30)"));
        assert_eq!(lines.next(), Some("Chain 2: 2xyz.B (Size=30)"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(
            lines.next(),
            Some(
                "Alignment length = 20 Rmsd = 1.23A Z-Score = 4.6 Gaps = 8(40.0%) CPU = 17 ms. Sequence identities = 100.0%"
            )
        );
    }

    #[test]
    fn printed_positions_recover_block_starts() {
        let c1 = chain("a", 200);
        let c2 = chain("b", 200);
        let result = ce_result(&c1, &c2, &[(5, 3, 60), (70, 66, 60)]);
        let report = render(&result, 0);

        let starts1 = printed_starts(&report, "Chain 1:");
        let starts2 = printed_starts(&report, "Chain 2:");
        let first = result.blocks()[0].first();
        assert_eq!(starts1[0] - 1, first.0);
        assert_eq!(starts2[0] - 1, first.1);
        assert_eq!(starts1.len(), 2);

        let gapped = result.path().gapped();
        let consumed1 = gapped.seq1.chars().take(70).filter(|&c| c != '-').count();
        assert_eq!(starts1[1] - 1, first.0 + consumed1);
    }

    #[test]
    fn alignment_lines_wrap_at_seventy_columns() {
        let c1 = chain("a", 100);
        let result = ce_result(&c1, &c1, &[(0, 0, 100)]);
        let report = render(&result, 0);
        let rows: Vec<&str> = report
            .lines()
            .filter(|l| l.starts_with("Chain 1:") && !l.contains("(Size="))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), "Chain 1:    1 ".len() + 70);
        assert!(rows[1].starts_with("Chain 1:   71 "));
    }

    #[test]
    fn report_ends_with_rotation_operators() {
        let c1 = chain("a", 20);
        let result = ce_result(&c1, &c1, &[(0, 0, 20)]);
        let report = render(&result, 0);
        assert!(report.contains("\n\n     X1 = ("));
        assert!(report.ends_with(")\n"));
    }
}
