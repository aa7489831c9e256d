//! Distance-based bond perception.
//!
//! Two atoms are bonded when their separation lies between `min_distance` and the sum of
//! their covalent radii plus `tolerance`. No valence or bond order information is used.

use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondPerception {
    /// Slack (Ångström) added to the sum of covalent radii.
    pub tolerance: f64,
    /// Separations below this distance (Ångström) are treated as overlapping atoms, not bonds.
    pub min_distance: f64,
}

impl Default for BondPerception {
    fn default() -> Self {
        Self {
            tolerance: 0.45,
            min_distance: 0.32,
        }
    }
}

/// Finds bonded pairs among atom centres.
///
/// # Arguments
///
/// * `centers` - `(position, covalent radius)` of each atom, both in Ångström.
/// * `params` - Distance criteria.
///
/// # Return
///
/// Index pairs `(i, j)` with `i < j`, sorted by `i` then `j`.
pub fn find_bonded_pairs(
    centers: &[(Point3<f64>, f64)],
    params: &BondPerception,
) -> Vec<(usize, usize)> {
    let min_distance_sq = params.min_distance * params.min_distance;

    let partners_of = |i: usize| {
        let (pos_i, radius_i) = centers[i];
        centers
            .iter()
            .enumerate()
            .skip(i + 1)
            .filter_map(move |(j, &(pos_j, radius_j))| {
                let cutoff = radius_i + radius_j + params.tolerance;
                let distance_sq = (pos_j - pos_i).norm_squared();
                if distance_sq < min_distance_sq || distance_sq > cutoff * cutoff {
                    None
                } else {
                    Some((i, j))
                }
            })
    };

    #[cfg(feature = "parallel")]
    let pairs: Vec<(usize, usize)> = (0..centers.len())
        .into_par_iter()
        .flat_map_iter(partners_of)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let pairs: Vec<(usize, usize)> = (0..centers.len()).flat_map(partners_of).collect();

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch4() -> Vec<(Point3<f64>, f64)> {
        let c = (Point3::origin(), 0.76);
        let d = 1.09 / 3f64.sqrt();
        vec![
            c,
            (Point3::new(d, d, d), 0.31),
            (Point3::new(-d, -d, d), 0.31),
            (Point3::new(-d, d, -d), 0.31),
            (Point3::new(d, -d, -d), 0.31),
        ]
    }

    #[test]
    fn methane_has_four_ch_bonds() {
        let pairs = find_bonded_pairs(&ch4(), &BondPerception::default());
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (0, 4)]);
    }

    #[test]
    fn distant_atoms_are_not_bonded() {
        let centers = vec![
            (Point3::origin(), 0.76),
            (Point3::new(3.0, 0.0, 0.0), 0.76),
        ];
        assert!(find_bonded_pairs(&centers, &BondPerception::default()).is_empty());
    }

    #[test]
    fn overlapping_atoms_are_not_bonded() {
        let centers = vec![
            (Point3::origin(), 0.76),
            (Point3::new(0.1, 0.0, 0.0), 0.76),
        ];
        assert!(find_bonded_pairs(&centers, &BondPerception::default()).is_empty());
    }

    #[test]
    fn tolerance_widens_the_cutoff() {
        let centers = vec![
            (Point3::origin(), 0.76),
            (Point3::new(2.0, 0.0, 0.0), 0.76),
        ];
        assert!(find_bonded_pairs(&centers, &BondPerception::default()).is_empty());

        let loose = BondPerception {
            tolerance: 0.6,
            ..Default::default()
        };
        assert_eq!(find_bonded_pairs(&centers, &loose), vec![(0, 1)]);
    }

    #[test]
    fn empty_input_yields_no_pairs() {
        assert!(find_bonded_pairs(&[], &BondPerception::default()).is_empty());
    }
}
