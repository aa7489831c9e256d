use crate::core::io::cube::{CubeMetadata, GridSet};
use crate::core::models::cube::Cube;
use crate::core::models::system::MolecularSystem;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Value statistics of one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStatistics {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    /// Sum of all samples times the voxel volume (value × Å³).
    pub integral: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    pub index: usize,
    /// Identifier listed in the header of a multi-grid file.
    pub identifier: Option<u32>,
    pub dimensions: [usize; 3],
    pub origin: Point3<f64>,
    pub spacing: Vector3<f64>,
    /// `None` for a grid without samples.
    pub statistics: Option<GridStatistics>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CubeSummary {
    pub title: String,
    pub comment: String,
    pub atom_count: usize,
    pub bond_count: usize,
    /// Whether the file used the multi-grid header (negative atom count).
    pub multi_grid: bool,
    /// Number of atoms per atomic number, in increasing atomic number.
    pub composition: Vec<(u8, usize)>,
    pub grids: Vec<GridSummary>,
}

/// Computes min, max, mean and integral of the samples of `cube`.
pub fn grid_statistics(cube: &Cube) -> Option<GridStatistics> {
    let data = cube.data();
    if data.is_empty() {
        return None;
    }

    let identity = || (f32::INFINITY, f32::NEG_INFINITY, 0.0f64);
    let fold = |(lo, hi, sum): (f32, f32, f64), &value: &f32| {
        (lo.min(value), hi.max(value), sum + f64::from(value))
    };

    #[cfg(feature = "parallel")]
    let (min, max, sum) = data
        .par_iter()
        .fold(identity, fold)
        .reduce(identity, |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2));

    #[cfg(not(feature = "parallel"))]
    let (min, max, sum) = data.iter().fold(identity(), fold);

    Some(GridStatistics {
        min,
        max,
        mean: sum / data.len() as f64,
        integral: sum * cube.voxel_volume(),
    })
}

/// Summarizes a decoded cube file.
pub fn summarize(system: &MolecularSystem, metadata: &CubeMetadata) -> CubeSummary {
    let mut composition: BTreeMap<u8, usize> = BTreeMap::new();
    for (_, atom) in system.atoms_iter() {
        *composition.entry(atom.atomic_number).or_default() += 1;
    }

    let identifiers: &[u32] = match &metadata.grid_set {
        GridSet::Single => &[],
        GridSet::Multiple { identifiers } => identifiers,
    };

    let grids = system
        .cubes()
        .iter()
        .enumerate()
        .map(|(index, cube)| GridSummary {
            index,
            identifier: identifiers.get(index).copied(),
            dimensions: cube.dimensions(),
            origin: cube.min(),
            spacing: cube.spacing(),
            statistics: grid_statistics(cube),
        })
        .collect::<Vec<_>>();
    debug!(grids = grids.len(), "Computed grid statistics.");

    CubeSummary {
        title: metadata.title.clone(),
        comment: metadata.comment.clone(),
        atom_count: system.atom_count(),
        bond_count: system.bonds().len(),
        multi_grid: matches!(metadata.grid_set, GridSet::Multiple { .. }),
        composition: composition.into_iter().collect(),
        grids,
    }
}
