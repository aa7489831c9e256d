use crate::core::models::system::MolecularSystem;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Grid index {index} is out of range; the system holds {count} grid(s)")]
    OutOfRange { index: usize, count: usize },
}

/// Returns a copy of `system` whose only grid is the grid at `index`.
///
/// Atoms, bonds and data entries are copied unchanged.
///
/// # Errors
///
/// Returns [`ExtractError::OutOfRange`] if `index` does not name an attached grid.
pub fn select_grid(system: &MolecularSystem, index: usize) -> Result<MolecularSystem, ExtractError> {
    let count = system.cube_count();
    if index >= count {
        return Err(ExtractError::OutOfRange { index, count });
    }

    let mut selected = system.clone();
    let cube = selected.take_cubes().swap_remove(index);
    selected.push_cube(cube);
    debug!(index, count, "Selected grid for writing.");
    Ok(selected)
}
