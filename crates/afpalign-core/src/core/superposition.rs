//! Least-squares rigid-body superposition of paired point sets.
//!
//! The optimal rotation is obtained from the singular value decomposition of the
//! cross-covariance matrix of the centered point sets (Kabsch), with the sign of the
//! smallest singular direction flipped when the naive solution would be a reflection.
//! Every transform produced here maps the *moving* points (chain 2) onto the *fixed*
//! points (chain 1).

use super::utils::geometry::{calculate_rmsd, centroid};
use nalgebra::{Matrix3, Point3, Rotation3, SymmetricEigen, Vector3};
use thiserror::Error;

const MIN_POINTS: usize = 3;
const COLLINEARITY_EPSILON: f64 = 1e-8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SuperpositionError {
    #[error("Superposition requires at least {MIN_POINTS} point pairs, got {0}")]
    TooFewPoints(usize),
    #[error("Point sets differ in size: {fixed} fixed vs {moving} moving")]
    LengthMismatch { fixed: usize, moving: usize },
    #[error("Points are collinear, the optimal rotation is not unique")]
    Collinear,
    #[error("Singular value decomposition of the covariance matrix failed")]
    Decomposition,
}

/// A proper rigid-body transform `x' = R·x + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation * point + self.translation
    }

    pub fn apply_all(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        points.iter().map(|p| self.apply(p)).collect()
    }

    /// Root-mean-square distance between `fixed` and `moving` after applying this transform
    /// to `moving`. Returns `None` for empty or mismatched inputs.
    pub fn rmsd(&self, fixed: &[Point3<f64>], moving: &[Point3<f64>]) -> Option<f64> {
        calculate_rmsd(fixed, &self.apply_all(moving))
    }

    /// Per-pair distances between `fixed` and transformed `moving`.
    pub fn deviations(&self, fixed: &[Point3<f64>], moving: &[Point3<f64>]) -> Vec<f64> {
        fixed
            .iter()
            .zip(moving)
            .map(|(f, m)| (self.apply(m) - f).norm())
            .collect()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Superposition {
    pub transform: Transform,
    pub rmsd: f64,
}

/// Computes the transform minimizing the squared distances between `fixed[i]` and the
/// transformed `moving[i]`.
///
/// # Errors
///
/// Returns [`SuperpositionError`] when fewer than three pairs are supplied, when the
/// slices differ in length, or when either point set is collinear.
pub fn superpose(
    fixed: &[Point3<f64>],
    moving: &[Point3<f64>],
) -> Result<Superposition, SuperpositionError> {
    if fixed.len() != moving.len() {
        return Err(SuperpositionError::LengthMismatch {
            fixed: fixed.len(),
            moving: moving.len(),
        });
    }
    if fixed.len() < MIN_POINTS {
        return Err(SuperpositionError::TooFewPoints(fixed.len()));
    }

    let fixed_center = centroid(fixed).ok_or(SuperpositionError::TooFewPoints(0))?;
    let moving_center = centroid(moving).ok_or(SuperpositionError::TooFewPoints(0))?;

    let mut covariance = Matrix3::zeros();
    let mut fixed_spread = Matrix3::zeros();
    let mut moving_spread = Matrix3::zeros();
    for (f, m) in fixed.iter().zip(moving) {
        let fc = f - fixed_center;
        let mc = m - moving_center;
        covariance += mc * fc.transpose();
        fixed_spread += fc * fc.transpose();
        moving_spread += mc * mc.transpose();
    }

    if is_collinear(fixed_spread) || is_collinear(moving_spread) {
        return Err(SuperpositionError::Collinear);
    }

    let svd = covariance.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(SuperpositionError::Decomposition),
    };
    let v = v_t.transpose();
    let d = (v * u.transpose()).determinant().signum();
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    let rotation = Rotation3::from_matrix_unchecked(v * correction * u.transpose());
    let translation = fixed_center.coords - rotation * moving_center.coords;

    let transform = Transform {
        rotation,
        translation,
    };
    let rmsd = transform
        .rmsd(fixed, moving)
        .ok_or(SuperpositionError::TooFewPoints(0))?;

    Ok(Superposition { transform, rmsd })
}

fn is_collinear(spread: Matrix3<f64>) -> bool {
    let mut eigenvalues: Vec<f64> = SymmetricEigen::new(spread).eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    eigenvalues[1] <= COLLINEARITY_EPSILON * eigenvalues[0].max(1.0)
}
