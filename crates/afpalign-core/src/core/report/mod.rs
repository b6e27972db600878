//! Text renderings of alignment results.
//!
//! Every renderer is a pure function of an [`AlignmentResult`](crate::core::models::result::AlignmentResult)
//! (plus the residue labels where a format prints residue numbers). The layouts are fixed:
//! downstream tools parse these reports column by column, so field order, widths and the
//! 70-column wrapping of alignment rows must not drift.
//!
//! - [`ce`] - CE-style report with sequential positions and rotation operators
//! - [`fatcat`] - FatCat-style report with block statistics and residue numbers
//! - [`db`] - one tab-separated line per database-search hit
//! - [`rotation`] - per-block rotation/translation operators
//! - [`viewer`] - the capability trait for external viewers
//!
//! The one-line summary is the `Display` implementation of the result itself.

pub mod ce;
pub mod db;
pub mod fatcat;
pub mod format;
pub mod rotation;
pub mod viewer;

/// Columns per alignment row in the CE and FatCat reports.
pub const LINE_WIDTH: usize = 70;
