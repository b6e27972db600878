//! Pipeline stages of a single alignment.
//!
//! Each stage reads an [`AlignmentContext`](crate::engine::context::AlignmentContext)
//! and hands its output to the next: fragment detection, the fragment graph, chaining
//! into initial blocks, and block optimization.

pub mod chaining;
pub mod fragments;
pub mod graph;
pub mod optimization;
