use crate::core::models::result::AlignmentResult;
use std::fmt::Write;

/// Renders the rigid-body operator of every block as explicit coordinate equations.
///
/// Block `n > 0` is expressed relative to the frame of block `n - 1` in the labels only;
/// the coefficients are always the block's own transform of the original chain-2 frame.
pub fn rotation_operators(result: &AlignmentResult) -> String {
    let mut text = String::new();
    let blocks = result.blocks();
    for (index, block) in blocks.iter().enumerate() {
        if blocks.len() > 1 {
            let _ = writeln!(text, "Operations for block {index}");
        }
        let origin = if index == 0 {
            "orig".to_string()
        } else {
            index.to_string()
        };
        let transform = block.transform();
        let matrix = transform.rotation.matrix();
        for (row, axis) in ["X", "Y", "Z"].iter().enumerate() {
            let _ = writeln!(
                text,
                "     {axis}{n} = ({:9.6})*X{origin} + ({:9.6})*Y{origin} + ({:9.6})*Z{origin} + ({:12.6})",
                matrix[(row, 0)],
                matrix[(row, 1)],
                matrix[(row, 2)],
                transform.translation[row],
                n = index + 1,
            );
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::algorithm::Algorithm;
    use crate::core::models::block::Block;
    use crate::core::models::coords::CoordinateSet;
    use crate::core::models::result::{AlignmentParts, InitialChain, OptimizationTrace};
    use crate::core::scoring::ScoreWeights;
    use nalgebra::{Point3, Vector3};

    fn trace(n: usize, shift: Vector3<f64>) -> CoordinateSet {
        let points = (0..n)
            .map(|i| {
                let t = i as f64;
                Point3::new(3.3 * t, if i % 2 == 0 { 1.0 } else { -1.0 }, 0.3 * t * t) + shift
            })
            .collect();
        CoordinateSet::from_points("t", points, 'A')
    }

    fn result_with_blocks(ranges: &[(usize, usize)]) -> AlignmentResult {
        let c1 = trace(20, Vector3::zeros());
        let c2 = trace(20, Vector3::new(1.0, -2.0, 0.5));
        let blocks: Vec<Block> = ranges
            .iter()
            .map(|&(from, to)| {
                let r: Vec<usize> = (from..to).collect();
                Block::build(&c1, &c2, r.clone(), r, vec![], &ScoreWeights::default()).unwrap()
            })
            .collect();
        let parts = AlignmentParts {
            algorithm: Algorithm::FatCatFlexible,
            afp_count: 0,
            fragment_length: 8,
            initial: InitialChain::default(),
            blocks,
            score: 0.0,
            total_rmsd: 0.0,
            significance: 1.0,
            trace: OptimizationTrace::default(),
        };
        AlignmentResult::assemble(parts, &c1, &c2)
    }

    #[test]
    fn single_block_has_no_header() {
        let text = rotation_operators(&result_with_blocks(&[(0, 10)]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("     X1 = ( 1.000000)*Xorig + ("));
        assert!(lines[0].ends_with(")*Zorig + (   -1.000000)"));
        assert!(lines[1].ends_with("+ (    2.000000)"));
        assert!(lines[2].starts_with("     Z1 = ("));
    }

    #[test]
    fn multiple_blocks_are_labelled() {
        let text = rotation_operators(&result_with_blocks(&[(0, 6), (8, 14)]));
        assert!(text.starts_with("Operations for block 0\n     X1 = "));
        assert!(text.contains("Operations for block 1\n     X2 = ("));
        assert!(text.contains(")*X1 + ("));
    }

    #[test]
    fn no_blocks_renders_nothing() {
        assert!(rotation_operators(&result_with_blocks(&[])).is_empty());
    }
}
