//! Provides input/output functionality for the Gaussian Cube file format.
//!
//! The [`cube`] codec is built from two lower layers: stateless text primitives in [`text`]
//! and a [`tokenizer`] that lets the decoder mix token-based and line-based reads over one
//! stream, which the cube grammar requires.

pub mod cube;
pub mod text;
pub mod tokenizer;
pub mod traits;
