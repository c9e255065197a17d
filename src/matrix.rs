//! All-pairs residue distance matrices.

use crate::error::ContactMapError;
use crate::residues::ResidueRecord;

use nalgebra as na;
use tracing::debug;

/// Largest structure a contact map is built for.
pub const MAX_RESIDUES: usize = 3000;

/// Target edge length of the default heatmap, in pixels.
const TARGET_MAP_SIZE: usize = 600;
/// Bounds on the pixels-per-residue zoom.
pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 20;

/// A symmetric residue-residue distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    /// Row-major size × size distances
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute Euclidean distances between all residue positions.
    ///
    /// Refuses structures larger than [`MAX_RESIDUES`] before allocating.
    pub fn build(residues: &[ResidueRecord]) -> Result<Self, ContactMapError> {
        let size = residues.len();
        if size > MAX_RESIDUES {
            return Err(ContactMapError::TooManyResidues(size));
        }

        let mut distances = vec![0.0; size * size];
        for i in 0..size {
            for j in i..size {
                let d = na::distance(&residues[i].position, &residues[j].position);
                distances[i * size + j] = d;
                distances[j * size + i] = d;
            }
        }
        debug!("Built {size}x{size} distance matrix");

        Ok(Self { size, distances })
    }

    /// Number of residues (matrix is size × size).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between residues i and j.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.size + j]
    }

    /// Row i of the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.distances[i * self.size..(i + 1) * self.size]
    }

    /// Upper-triangle pairs `(i, j, distance)` with `i <= j` and `distance <= cutoff`.
    pub fn pairs_within(&self, cutoff: f64) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size).flat_map(move |i| {
            (i..self.size).filter_map(move |j| {
                let d = self.get(i, j);
                (d <= cutoff).then_some((i, j, d))
            })
        })
    }
}

/// Default pixels per residue so the map is roughly 600 px across.
pub fn suggested_scale(n_residues: usize) -> u32 {
    if n_residues == 0 {
        return MAX_SCALE;
    }
    ((TARGET_MAP_SIZE / n_residues) as u32).clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residues::build_residues;
    use crate::source::ChainBundle;

    fn residues_at(points: &[(f64, f64, f64)]) -> Vec<ResidueRecord> {
        let bundle = ChainBundle {
            chain: Some("A".to_string()),
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
            z: points.iter().map(|p| p.2).collect(),
            labels: (0..points.len()).map(|i| format!("ALA {}", i + 1)).collect(),
            ss: vec![],
        };
        build_residues(&[bundle]).unwrap()
    }

    #[test]
    fn test_symmetric_zero_diagonal() {
        let residues = residues_at(&[
            (0.0, 0.0, 0.0),
            (3.0, 4.0, 0.0),
            (-1.5, 2.25, 7.0),
            (10.0, -3.0, 0.5),
        ]);
        let m = DistanceMatrix::build(&residues).unwrap();
        assert_eq!(m.size(), 4);
        for i in 0..4 {
            assert!(m.get(i, i).abs() < 1e-12);
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1) - 5.0).abs() < 1e-12);
        assert_eq!(m.row(1)[0], m.get(1, 0));
    }

    #[test]
    fn test_pairs_within() {
        let residues = residues_at(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (20.0, 0.0, 0.0)]);
        let m = DistanceMatrix::build(&residues).unwrap();
        let pairs: Vec<(usize, usize)> = m.pairs_within(15.0).map(|(i, j, _)| (i, j)).collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_suggested_scale() {
        assert_eq!(suggested_scale(10), 20);
        assert_eq!(suggested_scale(300), 2);
        assert_eq!(suggested_scale(3000), 1);
        assert_eq!(suggested_scale(0), 20);
        assert_eq!(suggested_scale(7), 20);
    }
}
