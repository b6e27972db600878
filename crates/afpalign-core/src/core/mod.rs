//! # Core Module
//!
//! Stateless building blocks of the alignment pipeline: data models, rigid-body
//! superposition, scoring, report rendering and Cα-trace I/O.
//!
//! ## Architecture
//!
//! - **Alignment Representation** ([`models`]) - Coordinates, fragments, blocks, paths and results
//! - **Geometry** ([`superposition`], [`utils`]) - Least-squares superposition and distance helpers
//! - **Scoring** ([`scoring`]) - The weighted score shared by chaining and optimization
//! - **Reports** ([`report`]) - CE-style, FatCat-style and database-search renderings
//! - **File I/O** ([`io`]) - Reading and writing Cα traces and search manifests
//!
//! Nothing in this module keeps state between calls; the stateful search lives in
//! [`crate::engine`].

pub mod io;
pub mod models;
pub mod report;
pub mod scoring;
pub mod superposition;
pub mod utils;
