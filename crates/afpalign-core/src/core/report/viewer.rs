use crate::core::models::coords::CoordinateSet;
use crate::core::models::result::AlignmentResult;

/// A consumer that presents a finished alignment, such as a molecular viewer or a file
/// exporter. The alignment pipeline never calls it; front ends hand results over.
pub trait AlignmentViewer {
    type Error: std::error::Error;

    fn show(
        &mut self,
        result: &AlignmentResult,
        chain1: &CoordinateSet,
        chain2: &CoordinateSet,
    ) -> Result<(), Self::Error>;
}
