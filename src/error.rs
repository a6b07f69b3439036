//! Unified error taxonomy for log parsing and thermochemistry evaluation.
//!
//! Every fallible operation in this crate reports one of the variants below,
//! distinguishing three failure families:
//!
//! - **Input incomplete**: a required section marker never appears in the
//!   file ([`ToolboxError::SectionNotFound`]).
//! - **Input malformed**: a line is present but cannot be decoded
//!   ([`ToolboxError::Malformed`], [`ToolboxError::UnsupportedElement`],
//!   [`ToolboxError::Inconsistent`]).
//! - **Value out of supported domain**: the data decoded fine but the
//!   requested evaluation point is outside the fitted range
//!   ([`ToolboxError::TemperatureOutOfRange`]).
//!
//! Each variant carries enough context (file, molecule, line) to locate the
//! offending record without re-running the extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Error type shared by all extraction and evaluation routines.
#[derive(Error, Debug)]
pub enum ToolboxError {
    /// File system or I/O operation failed.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// Path of the file that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A required section marker was not found in the document.
    #[error("marker {marker:?} not found in {file}")]
    SectionNotFound {
        /// Origin of the document being scanned.
        file: String,
        /// The marker phrase that was expected.
        marker: &'static str,
    },
    /// A line was located but could not be decoded.
    #[error("malformed input in {file}, line {line}: {what}")]
    Malformed {
        /// Origin of the document being decoded.
        file: String,
        /// 1-based line number of the offending record.
        line: usize,
        /// Description of what failed to decode.
        what: String,
    },
    /// An atomic number outside the supported element table.
    #[error("unsupported element: atomic number {atomic_number}")]
    UnsupportedElement {
        /// The atomic number that has no symbol mapping.
        atomic_number: u32,
    },
    /// Caller-supplied arrays do not agree in shape.
    #[error("inconsistent input: {what}")]
    Inconsistent {
        /// Description of the dimension mismatch.
        what: String,
    },
    /// Requested temperature lies outside the fitted polynomial range.
    ///
    /// This aborts evaluation of the whole thermo file, not just the
    /// offending molecule.
    #[error("temperature {temperature} K is outside the fitted range for {molecule} in {file}")]
    TemperatureOutOfRange {
        /// Thermo file being evaluated.
        file: String,
        /// Molecule whose polynomial does not cover the temperature.
        molecule: String,
        /// The requested temperature in Kelvin.
        temperature: f64,
    },
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, ToolboxError>;
