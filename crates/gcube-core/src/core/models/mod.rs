//! # Core Models Module
//!
//! Data structures describing a molecule together with the volumetric grids attached to it.
//!
//! ## Key Components
//!
//! - [`atom`] - An atom: atomic number and position in Ångström
//! - [`element`] - Periodic table lookups (symbols, covalent radii)
//! - [`topology`] - Bond connectivity between atoms
//! - [`cube`] - An axis-aligned lattice of scalar samples
//! - [`system`] - The molecule owning atoms, bonds, free-form data entries and grids
//! - [`ids`] - Stable identifiers for atoms
//!
//! ## Usage
//!
//! ```ignore
//! use gcube::core::models::system::MolecularSystem;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut system = MolecularSystem::new();
//! let o = system.add_atom(8);
//! system.atom_mut(o).unwrap().position = Point3::new(0.0, 0.0, 0.1173);
//!
//! let cube = system.add_cube();
//! cube.set_limits(Point3::origin(), [2, 2, 2], Vector3::repeat(0.5));
//! cube.set_data(vec![0.0; 8])?;
//! ```

pub mod atom;
pub mod cube;
pub mod element;
pub mod ids;
pub mod system;
pub mod topology;
