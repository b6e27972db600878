//! Provides input/output for Cα traces and search manifests.
//!
//! The alignment pipeline itself never touches files; these readers exist for front ends
//! that need to turn structure files into [`CoordinateSet`](crate::core::models::coords::CoordinateSet)s
//! and write superposed traces back out.

pub mod ca_trace;
pub mod manifest;
pub mod traits;
