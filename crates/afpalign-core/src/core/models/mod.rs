//! # Core Models Module
//!
//! Value types describing the inputs and outputs of a pairwise structure alignment.
//!
//! ## Overview
//!
//! The pipeline borrows two [`coords::CoordinateSet`]s (one Cα point and one residue
//! label per residue), produces [`afp::Afp`] candidates, groups chained fragments into
//! [`block::Block`]s and finally freezes everything into an [`result::AlignmentResult`].
//! Apart from the result, every type here is a small immutable value; the pipeline
//! replaces values rather than mutating them.
//!
//! ## Key Components
//!
//! - [`coords`] - Cα traces with residue labels
//! - [`residue`] - One-letter residue codes and identity/similarity classes
//! - [`afp`] - Aligned fragment pairs
//! - [`block`] - Runs of equivalent residues sharing one rigid-body transform
//! - [`path`] - The aligned pairs and their gapped text rendering
//! - [`algorithm`] - The alignment method and the conventions it implies
//! - [`result`] - The frozen outcome of one alignment run

pub mod afp;
pub mod algorithm;
pub mod block;
pub mod coords;
pub mod path;
pub mod residue;
pub mod result;
