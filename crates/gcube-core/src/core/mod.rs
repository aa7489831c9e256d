//! # Core Module
//!
//! This module provides the data structures and the file codec of gcube.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, grids and the owning system
//! - **File I/O** ([`io`]) - Text primitives, the shared token reader and the cube codec
//! - **Utilities** ([`utils`]) - Unit conversion constants and bond perception
//!
//! ## Units
//!
//! Every length held by the models is in Ångström. Cube files store lengths in Bohr; the
//! conversion happens only inside [`io::cube`] using the constants of [`utils::units`].

pub mod io;
pub mod models;
pub mod utils;
