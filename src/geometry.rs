//! Molecular geometry extraction and representation.
//!
//! This module decodes atomic coordinates from the two source layouts the
//! toolbox understands, the "Input orientation" table of a Gaussian log and
//! plain .xyz trajectory frames, into a [`Geometry`], and writes geometries
//! back out (Gaussian input coordinate blocks, .xyz files, wrapped
//! trajectory frames).
//!
//! Atom ordering is identity: the i-th [`AtomRecord`] of a geometry
//! corresponds to the i-th row of the source table, and every structure
//! derived from the same document (distance matrix, partial charges) is
//! indexed by that same position.
//!
//! Coordinates are Cartesian, in Angstroms, stored flat as
//! `[x1, y1, z1, x2, y2, z2, ...]`.

use crate::elements::element_symbol;
use crate::error::Result;
use crate::logfile::{converged_window, LogDocument, SourceFormat};
use lazy_static::lazy_static;
use nalgebra::DVector;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    // Robust floating-point pattern: 1.23, -0.032, 1.2e-4, .123
    static ref FLOAT_RE: String = r"[-+]?(?:\d+\.\d*|\.\d+)(?:[eE][-+]?\d+)?".to_string();

    // Orientation row: " 1 8 0 -0.032352 0.050285 0.089439"
    // (center number, atomic number, atomic type, x, y, z)
    static ref ORIENTATION_RE: Regex = Regex::new(&format!(
        r"^\s*\d+\s+(\d+)\s+\d+\s+({0})\s+({0})\s+({0})",
        *FLOAT_RE
    ))
    .unwrap();
}

/// One atom of a molecule: element symbol plus Cartesian position.
///
/// Borrowed view into a [`Geometry`]; the record's index in the parent is
/// the atom's identity across all derived structures of one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomRecord<'a> {
    /// Element symbol (e.g. "O", "Na").
    pub symbol: &'a str,
    /// Cartesian position [x, y, z] in Angstroms.
    pub position: [f64; 3],
}

/// A molecular geometry: element symbols and flat Cartesian coordinates.
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Chemical element symbols for each atom, in source order.
    pub elements: Vec<String>,
    /// Flattened Cartesian coordinates [x1, y1, z1, x2, y2, z2, ...] in Angstroms.
    pub coords: DVector<f64>,
    /// Number of atoms in the molecule.
    pub num_atoms: usize,
}

impl Geometry {
    /// Creates a new `Geometry` from an element list and coordinate vector.
    ///
    /// # Panics
    ///
    /// Panics if `coords.len() != elements.len() * 3`.
    pub fn new(elements: Vec<String>, coords: Vec<f64>) -> Self {
        let num_atoms = elements.len();
        assert_eq!(coords.len(), num_atoms * 3);
        Self {
            elements,
            coords: DVector::from_vec(coords),
            num_atoms,
        }
    }

    /// Cartesian coordinates of one atom.
    pub fn get_atom_coords(&self, atom_idx: usize) -> [f64; 3] {
        let i = atom_idx * 3;
        [self.coords[i], self.coords[i + 1], self.coords[i + 2]]
    }

    /// The atom at `idx` as an [`AtomRecord`].
    pub fn atom(&self, idx: usize) -> AtomRecord<'_> {
        AtomRecord {
            symbol: &self.elements[idx],
            position: self.get_atom_coords(idx),
        }
    }

    /// Iterates over all atoms in source order.
    pub fn atoms(&self) -> impl Iterator<Item = AtomRecord<'_>> {
        (0..self.num_atoms).map(move |i| self.atom(i))
    }
}

/// Formats one atom as a Gaussian input coordinate line, fixed-width aligned,
/// five decimal places.
pub fn format_atom_line(symbol: &str, position: [f64; 3]) -> String {
    format!(
        " {:<6}{:>12.5}{:>14.5}{:>14.5}",
        symbol, position[0], position[1], position[2]
    )
}

/// Extracts a geometry from a coordinate source of the given format.
///
/// For [`SourceFormat::CalculationLog`] the document is first narrowed to the
/// converged window ("Optimization complete" ... job boundary, best-effort),
/// then the "Input orientation" table is decoded; both the orientation marker
/// and the closing "Distance matrix" marker are required. Atomic numbers are
/// mapped through the closed element table; an unmapped number is a hard
/// error.
///
/// For [`SourceFormat::Trajectory`], indented `symbol x y z` lines are
/// decoded directly.
///
/// # Errors
///
/// [`crate::error::ToolboxError::SectionNotFound`] when a required marker is
/// absent, [`crate::error::ToolboxError::Malformed`] for undecodable rows,
/// [`crate::error::ToolboxError::UnsupportedElement`] for atomic numbers
/// outside the table.
pub fn extract_coordinates(doc: &LogDocument, format: SourceFormat) -> Result<Geometry> {
    match format {
        SourceFormat::CalculationLog => extract_from_log(doc),
        SourceFormat::Trajectory => extract_from_trajectory(doc),
    }
}

fn extract_from_log(doc: &LogDocument) -> Result<Geometry> {
    let window = converged_window(doc);
    // Marker line + table header (4 lines) precede the first atom row; a
    // dashed separator line sits right before "Distance matrix".
    let table = window
        .after("Input orientation", 5)
        .ok_or_else(|| doc.missing("Input orientation"))?;
    let table = table
        .until("Distance matrix", 1)
        .ok_or_else(|| doc.missing("Distance matrix"))?;

    let mut elements = Vec::new();
    let mut coords = Vec::new();
    for (offset, line) in table.lines().iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let caps = ORIENTATION_RE
            .captures(line)
            .ok_or_else(|| doc.malformed(table.start_line() + offset, "orientation row"))?;
        let atomic_number: u32 = caps[1]
            .parse()
            .map_err(|_| doc.malformed(table.start_line() + offset, "atomic number"))?;
        elements.push(element_symbol(atomic_number)?.to_string());
        for cap in 2..=4 {
            let value: f64 = caps[cap]
                .parse()
                .map_err(|_| doc.malformed(table.start_line() + offset, "coordinate"))?;
            coords.push(value);
        }
    }
    Ok(Geometry::new(elements, coords))
}

fn extract_from_trajectory(doc: &LogDocument) -> Result<Geometry> {
    let mut elements = Vec::new();
    let mut coords = Vec::new();
    for (num, line) in doc.lines().iter().enumerate() {
        // Atom lines in MD-written frames are indented; the count and
        // comment lines are not.
        if line.trim().is_empty() || !line.starts_with(char::is_whitespace) {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 || !parts[0].chars().next().is_some_and(|c| c.is_alphabetic()) {
            continue;
        }
        elements.push(parts[0].to_string());
        for part in &parts[1..4] {
            let value: f64 = part
                .parse()
                .map_err(|_| doc.malformed(num, "trajectory coordinate"))?;
            coords.push(value);
        }
    }
    Ok(Geometry::new(elements, coords))
}

/// Writes a geometry to an .xyz file: atom count, blank comment line, one
/// `symbol x y z` line per atom.
pub fn write_xyz(geom: &Geometry, path: &Path) -> Result<()> {
    let mut content = format!("{}\n\n", geom.num_atoms);
    for atom in geom.atoms() {
        content.push_str(&format!(
            " {}  {:.5}  {:.5}  {:.5}\n",
            atom.symbol, atom.position[0], atom.position[1], atom.position[2]
        ));
    }
    fs::write(path, content).map_err(|source| crate::error::ToolboxError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Wraps one Cartesian component across all atoms: values are re-centered on
/// the first atom, then any component beyond `wrap_cutoff` is shifted by one
/// `box_size` back into the cell.
pub fn wrap_axis(values: &[f64], box_size: f64, wrap_cutoff: f64) -> Vec<f64> {
    let origin = values.first().copied().unwrap_or(0.0);
    values
        .iter()
        .map(|v| {
            let shifted = v - origin;
            if shifted > wrap_cutoff {
                shifted - box_size
            } else if shifted < -wrap_cutoff {
                shifted + box_size
            } else {
                shifted
            }
        })
        .collect()
}

/// Rewrites a trajectory file in place with coordinates wrapped around
/// `box_size` (see [`wrap_axis`]); output keeps the indented frame layout
/// with five-decimal formatting.
pub fn wrap_trajectory(path: &Path, box_size: f64, wrap_cutoff: f64) -> Result<()> {
    let doc = LogDocument::read(path)?;
    let geom = extract_coordinates(&doc, SourceFormat::Trajectory)?;

    let axis =
        |k: usize| -> Vec<f64> { (0..geom.num_atoms).map(|i| geom.coords[i * 3 + k]).collect() };
    let xs = wrap_axis(&axis(0), box_size, wrap_cutoff);
    let ys = wrap_axis(&axis(1), box_size, wrap_cutoff);
    let zs = wrap_axis(&axis(2), box_size, wrap_cutoff);

    let mut content = String::from("\n");
    for i in 0..geom.num_atoms {
        content.push_str(&format!(
            "          {:<4}      {:>10.5}     {:>10.5}     {:>10.5}\n",
            geom.elements[i], xs[i], ys[i], zs[i]
        ));
    }
    fs::write(path, content).map_err(|source| crate::error::ToolboxError::Io {
        path: path.to_path_buf(),
        source,
    })
}
