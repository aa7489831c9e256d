//! High-level procedures built on the core models and codec.
//!
//! - [`inspect`] computes a summary of a decoded file: composition and per-grid statistics.
//! - [`extract`] builds a single-grid copy of a system so any grid of a multi-grid file can be
//!   handed to the cube writer, which only ever writes the first grid.

pub mod extract;
pub mod inspect;
