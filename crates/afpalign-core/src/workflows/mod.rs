//! # Workflows Module
//!
//! High-level entry points that run complete alignment procedures.
//!
//! ## Overview
//!
//! Workflows are the top-level API of the library. They validate the configuration,
//! drive the engine pipeline phase by phase, report progress, and assemble immutable
//! results. Everything below this layer is an implementation detail that workflows
//! compose.
//!
//! ## Architecture
//!
//! - **Pairwise Alignment** ([`align`]) - Aligns two chains through fragment detection,
//!   chaining, block optimization and significance estimation.
//! - **Database Search** ([`search`]) - Aligns one query against many targets in
//!   parallel and ranks the results by score.

pub mod align;
pub mod search;
