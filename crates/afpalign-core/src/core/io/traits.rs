use crate::core::models::coords::CoordinateSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing coordinate file formats.
///
/// Implementors turn a structure file into the Cα trace of one chain and write a trace
/// back out, for example after superposition onto another chain.
pub trait CoordinateFile {
    /// Format-specific choice of what to read (chain, model, ...).
    type Selection;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads one chain's Cα trace from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `name` - The name given to the resulting coordinate set.
    /// * `selection` - Which part of the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, nothing is selected, or I/O fails.
    fn read_from(
        reader: &mut impl BufRead,
        name: &str,
        selection: &Self::Selection,
    ) -> Result<CoordinateSet, Self::Error>;

    /// Writes a coordinate set to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(set: &CoordinateSet, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads one chain's Cα trace from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    /// * `name` - The name given to the resulting coordinate set.
    /// * `selection` - Which part of the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        name: &str,
        selection: &Self::Selection,
    ) -> Result<CoordinateSet, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, name, selection)
    }

    /// Writes a coordinate set to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(set: &CoordinateSet, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(set, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
