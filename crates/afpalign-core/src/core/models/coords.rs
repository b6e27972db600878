use super::residue::ResidueLabel;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateSetError {
    #[error("Chain '{name}' has {points} points but {labels} residue labels")]
    LabelCountMismatch {
        name: String,
        points: usize,
        labels: usize,
    },
}

/// The Cα trace of one chain: one point per residue plus the labels used for reports.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSet {
    name: String,
    points: Vec<Point3<f64>>,
    labels: Vec<ResidueLabel>,
}

impl CoordinateSet {
    pub fn new(
        name: impl Into<String>,
        points: Vec<Point3<f64>>,
        labels: Vec<ResidueLabel>,
    ) -> Result<Self, CoordinateSetError> {
        let name = name.into();
        if points.len() != labels.len() {
            return Err(CoordinateSetError::LabelCountMismatch {
                name,
                points: points.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            name,
            points,
            labels,
        })
    }

    /// Builds a set whose residues are all labelled `code` and numbered from 1.
    pub fn from_points(name: impl Into<String>, points: Vec<Point3<f64>>, code: char) -> Self {
        let labels = (1..=points.len())
            .map(|n| ResidueLabel::new(code, n.to_string()))
            .collect();
        Self {
            name: name.into(),
            points,
            labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn labels(&self) -> &[ResidueLabel] {
        &self.labels
    }

    pub fn point(&self, index: usize) -> &Point3<f64> {
        &self.points[index]
    }

    pub fn code(&self, index: usize) -> char {
        self.labels[index].code
    }

    pub fn residue_number(&self, index: usize) -> &str {
        &self.labels[index].number
    }

    /// Collects the points at `indices`, in order.
    pub fn gather(&self, indices: &[usize]) -> Vec<Point3<f64>> {
        indices.iter().map(|&i| self.points[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_label_count() {
        let result = CoordinateSet::new(
            "1abc.A",
            vec![Point3::origin(), Point3::new(3.8, 0.0, 0.0)],
            vec![ResidueLabel::new('G', "1")],
        );
        assert_eq!(
            result,
            Err(CoordinateSetError::LabelCountMismatch {
                name: "1abc.A".to_string(),
                points: 2,
                labels: 1,
            })
        );
    }

    #[test]
    fn from_points_numbers_residues_from_one() {
        let set = CoordinateSet::from_points(
            "trace",
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            'A',
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.residue_number(0), "1");
        assert_eq!(set.residue_number(1), "2");
        assert_eq!(set.code(1), 'A');
    }

    #[test]
    fn gather_preserves_requested_order() {
        let set = CoordinateSet::from_points(
            "trace",
            (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect(),
            'A',
        );
        let picked = set.gather(&[3, 1]);
        assert_eq!(picked, vec![Point3::new(3.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
    }
}
