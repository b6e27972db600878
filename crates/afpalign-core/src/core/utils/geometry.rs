use nalgebra::{Point3, Rotation3, Vector3};

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Pools per-block RMSD values into one RMSD weighted by the number of pairs in each block.
pub fn pooled_rmsd<I>(parts: I) -> f64
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let (count, sum_sq) = parts
        .into_iter()
        .fold((0usize, 0.0f64), |(count, sum_sq), (n, rmsd)| {
            (count + n, sum_sq + n as f64 * rmsd * rmsd)
        });
    if count == 0 {
        0.0
    } else {
        (sum_sq / count as f64).sqrt()
    }
}

/// Angle in degrees of the relative rotation taking `a` to `b`.
pub fn rotation_angle_between(a: &Rotation3<f64>, b: &Rotation3<f64>) -> f64 {
    (a.inverse() * b).angle().to_degrees()
}

pub fn find_max_deviation(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<(usize, f64)> {
    coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm())
        .enumerate()
        .max_by(|(_, d1), (_, d2)| d1.partial_cmp(d2).unwrap_or(std::cmp::Ordering::Equal))
}
