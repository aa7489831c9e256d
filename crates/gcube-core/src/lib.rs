//! # gcube Core Library
//!
//! A reader and writer for the Gaussian Cube volumetric data format: a molecular geometry
//! followed by one or more scalar grids (electron densities, molecular orbitals, potentials)
//! sampled on an axis-aligned lattice.
//!
//! ## Architectural Philosophy
//!
//! The library follows a two-layer layout:
//!
//! - **[`core`]: The Foundation.** Contains the in-memory data models (`MolecularSystem`,
//!   `Cube`), the text primitives and token reader used by the codec, the codec itself
//!   (`CubeFile`), unit constants, and distance-based bond perception.
//!
//! - **[`workflows`]: The Public API.** Higher-level procedures built on top of `core`, such as
//!   computing per-grid statistics or extracting one grid of a multi-grid file into a model
//!   that the single-grid writer can serialize.

pub mod core;
pub mod workflows;
