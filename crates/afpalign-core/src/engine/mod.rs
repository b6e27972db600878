//! # Engine Module
//!
//! This module implements the alignment engine: the stateful machinery that turns two
//! Cα traces into a chain of aligned fragments and refines it into rigid blocks.
//!
//! ## Overview
//!
//! An alignment runs as a fixed pipeline. Intra-chain distance matrices are computed
//! once per chain; aligned fragment pairs (AFPs) are enumerated from them; the best
//! chain of fragments is found by dynamic programming over a directed acyclic graph,
//! inserting twists where the rigid-body transform changes; the resulting blocks are
//! refined by an optimizer that extends, splits, merges and trims them while the global
//! score strictly improves. Finally the significance of the alignment is estimated.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Fragment, chaining, scoring, optimization and
//!   significance parameters, with TOML loading and validation
//! - **Run Context** ([`context`]) - Read-only inputs of one alignment plus cooperative
//!   cancellation
//! - **Distance Matrices** ([`distance`]) - Pairwise Cα distances of a single chain
//! - **Optimizer State** ([`state`]) - The block decomposition under refinement, its
//!   phases and the global score
//! - **Significance** ([`significance`]) - CE Z-scores and Gumbel P-values
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Key Capabilities
//!
//! - **Lazy fragment enumeration** that can be cancelled between window pairs
//! - **Deterministic chaining** with explicit tie-breaking rules
//! - **Monotonic refinement**: rejected modifications leave no trace
//! - **Flexible and rigid modes** selected by the algorithm's twist budget

pub mod config;
pub mod context;
pub mod distance;
pub mod error;
pub mod progress;
pub mod significance;
pub mod state;
pub(crate) mod tasks;
