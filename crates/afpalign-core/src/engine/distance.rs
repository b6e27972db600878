use super::error::EngineError;
use crate::core::models::coords::CoordinateSet;
use crate::core::utils::geometry::distance;
use nalgebra::DMatrix;

/// Symmetric matrix of Euclidean distances between all residues of one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    matrix: DMatrix<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix for `chain`, which must hold at least `min_length` residues.
    pub fn build(chain: &CoordinateSet, min_length: usize) -> Result<Self, EngineError> {
        let n = chain.len();
        if n < min_length || n == 0 {
            return Err(EngineError::InsufficientData {
                chain: chain.name().to_string(),
                length: n,
                required: min_length.max(1),
            });
        }
        let points = chain.points();
        let mut matrix = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(&points[i], &points[j]);
                matrix[(i, j)] = d;
                matrix[(j, i)] = d;
            }
        }
        Ok(Self { matrix })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }
}
