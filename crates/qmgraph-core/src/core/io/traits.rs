use crate::core::models::molecule::MoleculeRecord;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading molecular geometry file formats.
///
/// This trait provides a common API for geometry input, so every supported
/// encoding exposes the same `read(source, property_count)` contract.
/// Implementors handle format-specific parsing; molecule indices are assigned
/// sequentially in file order.
pub trait GeometryFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every molecule record from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `property_count` - The configured length of each molecule's
    ///   target-property vector.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        property_count: usize,
    ) -> Result<Vec<MoleculeRecord>, Self::Error>;

    /// Reads every molecule record from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        property_count: usize,
    ) -> Result<Vec<MoleculeRecord>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, property_count)
    }
}
