//! Synthetic Cα traces shared by unit tests.

use crate::core::models::coords::CoordinateSet;
use crate::core::models::residue::ResidueLabel;
use nalgebra::{Point3, Rotation3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CODES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

fn labelled(name: &str, points: Vec<Point3<f64>>) -> CoordinateSet {
    let labels = (0..points.len())
        .map(|i| ResidueLabel::new(CODES[(i * 7) % CODES.len()] as char, (i + 1).to_string()))
        .collect();
    CoordinateSet::new(name, points, labels).unwrap()
}

/// An ideal α-helix: radius 2.3 Å, 100° turn and 1.5 Å rise per residue.
pub fn helix(name: &str, n: usize) -> CoordinateSet {
    let points = (0..n)
        .map(|i| {
            let t = i as f64;
            Point3::new(2.3 * (t * 1.745).cos(), 2.3 * (t * 1.745).sin(), 1.5 * t)
        })
        .collect();
    labelled(name, points)
}

/// A chain-like random walk with 3.8 Å steps.
pub fn random_walk(name: &str, n: usize, seed: u64) -> CoordinateSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    let mut current = Point3::origin();
    for _ in 0..n {
        points.push(current);
        let direction = loop {
            let v = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let norm = v.norm();
            if norm > 0.1 && norm <= 1.0 {
                break v / norm;
            }
        };
        current += direction * 3.8;
    }
    labelled(name, points)
}

/// Points scattered uniformly in a cube of `edge` Å.
pub fn random_cloud(name: &str, n: usize, edge: f64, seed: u64) -> CoordinateSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(0.0..edge),
                rng.gen_range(0.0..edge),
                rng.gen_range(0.0..edge),
            )
        })
        .collect();
    labelled(name, points)
}

/// Rigidly moves every point of `set`, keeping its labels.
pub fn moved(
    set: &CoordinateSet,
    name: &str,
    axis_angle: Vector3<f64>,
    shift: Vector3<f64>,
) -> CoordinateSet {
    let rotation = Rotation3::new(axis_angle);
    let points = set.points().iter().map(|p| rotation * p + shift).collect();
    CoordinateSet::new(name, points, set.labels().to_vec()).unwrap()
}

/// Residues `range` of `set`, renumbered from 1 but keeping their codes.
pub fn slice(set: &CoordinateSet, name: &str, range: std::ops::Range<usize>) -> CoordinateSet {
    let points = set.points()[range.clone()].to_vec();
    let labels = set.labels()[range]
        .iter()
        .enumerate()
        .map(|(i, l)| ResidueLabel::new(l.code, (i + 1).to_string()))
        .collect();
    CoordinateSet::new(name, points, labels).unwrap()
}

/// Joins two traces into one chain.
pub fn joined(name: &str, first: &CoordinateSet, second: &CoordinateSet) -> CoordinateSet {
    let points = first.points().iter().chain(second.points()).copied().collect();
    labelled(name, points)
}
