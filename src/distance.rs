//! Interatomic distance matrix reconstruction.
//!
//! Gaussian prints the symmetric N×N distance table in lower-triangular
//! blocks of at most five columns so the matrix fits the page width:
//!
//! ```text
//!                     Distance matrix (angstroms):
//!                     1          2          3
//!      1  O    0.000000
//!      2  H    0.957880   0.000000
//!      3  H    0.957880   1.538960   0.000000
//! ```
//!
//! For N > 5 the table continues with further blocks, each headed by its own
//! column-index row and covering rows from the block's first column to N.
//! [`distance_matrix`] reassembles the `ceil(N/5)` blocks into one dense
//! [`DMatrix`], stripping the numeric row/column headers and the per-row
//! element symbols, and mirroring every decoded lower-triangle entry into
//! the strict upper triangle.
//!
//! Invariants of the result: `m[(i, j)] == m[(j, i)]` for all i, j and
//! `m[(i, i)] == 0.0` exactly. Rows and columns are indexed by the atom's
//! position in the "Input orientation" table of the same document.

use crate::error::Result;
use crate::geometry::extract_coordinates;
use crate::logfile::{converged_window, LogDocument, SourceFormat};
use nalgebra::DMatrix;

/// Reconstructs the full symmetric distance matrix (in Angstroms) from a
/// Gaussian log.
///
/// The atom count is taken from the document's own "Input orientation"
/// table, so the matrix is guaranteed to be indexed consistently with the
/// coordinates extracted from the same file.
///
/// # Errors
///
/// [`crate::error::ToolboxError::SectionNotFound`] when the document has no
/// "Distance matrix" section, [`crate::error::ToolboxError::Malformed`] when
/// a row cannot be decoded or the table does not cover all atom pairs.
pub fn distance_matrix(doc: &LogDocument) -> Result<DMatrix<f64>> {
    let atom_count = extract_coordinates(doc, SourceFormat::CalculationLog)?.num_atoms;

    let window = converged_window(doc);
    // Skip the marker line itself; the column header of the first block is
    // recognized inside the fill loop. "Stoichiometry" closes the section in
    // optimization logs; when absent the loop stops at the first foreign line.
    let section = window
        .after("Distance matrix", 1)
        .ok_or_else(|| doc.missing("Distance matrix"))?
        .until_or_here("Stoichiometry", 0);

    let mut matrix = DMatrix::zeros(atom_count, atom_count);
    let mut filled = vec![false; atom_count * atom_count];
    // Column offset of the block currently being read.
    let mut base_column = 0usize;

    for (offset, line) in section.lines().iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if tokens.iter().all(|t| t.parse::<usize>().is_ok()) {
            // Column-index header: starts the next block.
            let first: usize = tokens[0]
                .parse()
                .map_err(|_| doc.malformed(section.start_line() + offset, "column header"))?;
            if first == 0 || first > atom_count {
                return Err(doc.malformed(
                    section.start_line() + offset,
                    format!("column index {} out of range", first),
                ));
            }
            base_column = first - 1;
            continue;
        }

        let is_row = tokens.len() >= 3
            && tokens[0].parse::<usize>().is_ok()
            && tokens[1].chars().next().is_some_and(|c| c.is_alphabetic());
        if !is_row {
            // End of the table (e.g. the next section of a log without a
            // "Stoichiometry" line).
            break;
        }

        let row: usize = tokens[0]
            .parse()
            .map_err(|_| doc.malformed(section.start_line() + offset, "row index"))?;
        if row == 0 || row > atom_count {
            return Err(doc.malformed(
                section.start_line() + offset,
                format!("row index {} out of range", row),
            ));
        }
        let row = row - 1;

        for (k, token) in tokens[2..].iter().enumerate() {
            let col = base_column + k;
            if col > row {
                return Err(doc.malformed(
                    section.start_line() + offset,
                    "entry above the diagonal in a lower-triangular block",
                ));
            }
            let value: f64 = token
                .parse()
                .map_err(|_| doc.malformed(section.start_line() + offset, "distance entry"))?;
            matrix[(row, col)] = value;
            matrix[(col, row)] = value;
            filled[row * atom_count + col] = true;
            filled[col * atom_count + row] = true;
        }
    }

    if filled.iter().any(|f| !f) {
        return Err(doc.malformed(
            section.start_line(),
            format!("distance table does not cover all {} atoms", atom_count),
        ));
    }

    // The diagonal is zero by definition; the printed 0.000000 entries parse
    // to exactly 0.0, this just pins the invariant.
    for i in 0..atom_count {
        matrix[(i, i)] = 0.0;
    }

    Ok(matrix)
}
