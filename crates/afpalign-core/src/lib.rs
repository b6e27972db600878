//! # AFPAlign Core Library
//!
//! Flexible and rigid protein structure alignment built on aligned fragment pairs (AFPs),
//! in the tradition of the CE and FATCAT methods.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be
//! tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`CoordinateSet`, `Afp`, `Block`,
//!   `AlignmentResult`), least-squares superposition, the scoring function, text
//!   renderers for results, and Cα-trace I/O.
//!
//! - **[`engine`]: The Logic Core.** The stateful alignment pipeline: distance matrices,
//!   fragment detection, dynamic-programming chaining with twists, and the block
//!   optimizer, together with configuration, progress reporting and cancellation.
//!
//! - **[`workflows`]: The Public API.** Pairwise alignment and database search, tying
//!   `engine` and `core` together behind a small set of functions.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
