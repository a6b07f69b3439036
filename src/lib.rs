#![deny(missing_docs)]

//! dft-toolbox - post-processing for Gaussian 16 / Arkane workflows.
//!
//! This crate post-processes the output of electronic-structure and
//! statistical-mechanics calculations and synthesizes the input files of the
//! next workflow stage: gas-phase optimization, continuum-solvent (PCM)
//! correction, thermochemistry fitting with Arkane.
//!
//! # Overview
//!
//! The core of the crate is a structured text extraction and re-synthesis
//! pipeline over fixed-format scientific log files:
//!
//! - **Section slicing** ([`logfile`]): one composable "find section between
//!   markers" primitive shared by every extractor, with an explicit
//!   not-found outcome.
//! - **Coordinate and distance reconstruction** ([`geometry`], [`distance`]):
//!   positional-column decoding of the "Input orientation" table and
//!   reassembly of the symmetric distance matrix from its banded 5-column
//!   block representation.
//! - **Thermochemistry evaluation** ([`thermo`], [`boltzmann`]): NASA
//!   polynomial evaluation with closed-form enthalpy/entropy integrals, and
//!   Boltzmann-weighted ensemble averages with the Gibbs mixing term.
//! - **Input synthesis** ([`gaussian`], [`slurm`], [`arkane`]): emission of
//!   the gas-phase/PCM job pair, its submission script, and the accumulating
//!   Arkane composite input.
//!
//! # Quick Start
//!
//! ```no_run
//! use dft_toolbox::logfile::{LogDocument, SourceFormat};
//! use dft_toolbox::geometry::extract_coordinates;
//! use std::path::Path;
//!
//! fn main() -> Result<(), dft_toolbox::error::ToolboxError> {
//!     let doc = LogDocument::read(Path::new("sim001.log"))?;
//!     let geometry = extract_coordinates(&doc, SourceFormat::CalculationLog)?;
//!     for atom in geometry.atoms() {
//!         println!("{} {:?}", atom.symbol, atom.position);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Units
//!
//! Coordinates and distances are in Angstroms; thermochemical quantities in
//! kcal/mol and kcal/(mol*K); frequencies in cm^-1; moments in Debye and
//! Debye*Angstrom.
//!
//! # Error Handling
//!
//! Every fallible operation returns [`error::ToolboxError`], which separates
//! missing sections, malformed records and out-of-domain evaluation points
//! and carries the file/molecule/line context needed for diagnosis.
//!
//! # Scope
//!
//! The crate assumes well-formed output of successfully completed Gaussian
//! calculations; it performs no physical validation and knows no other
//! engine's output format.

/// Arkane input assembly
pub mod arkane;
/// Boltzmann-weighted ensemble averages
pub mod boltzmann;
/// Interatomic distance matrix reconstruction
pub mod distance;
pub mod elements;
pub mod error;
/// Harmonic frequency extraction
pub mod frequencies;
/// Gaussian 16 input synthesis
pub mod gaussian;
pub mod geometry;
/// Built-in help system
pub mod help;
/// Fixed-format log documents and section slicing
pub mod logfile;
/// Derived file naming for multi-stage jobs
pub mod naming;
/// Natural population analysis charges and multipole moments
pub mod population;
/// SLURM submission script synthesis
pub mod slurm;
/// Continuum-solvation free energies
pub mod solvation;
/// Configuration management system
pub mod settings;
pub mod thermo;

pub use error::{Result, ToolboxError};
pub use geometry::Geometry;
pub use logfile::{LogDocument, SourceFormat};
