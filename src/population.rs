//! Natural population analysis charges and derived multipole moments.
//!
//! The NBO 3.1 program built into Gaussian prints a per-atom summary table;
//! [`nbo_charges`] decodes the natural charge column, keyed by the atom's
//! position in the "Input orientation" table of the same document. The
//! charges combine with the extracted coordinates to give classical dipole
//! and quadrupole moments about a selectable origin.

use crate::error::{Result, ToolboxError};
use crate::geometry::extract_coordinates;
use crate::logfile::{LogDocument, SourceFormat};
use nalgebra::{Matrix3, Vector3};

/// Conversion factor e*Angstrom -> Debye.
const E_ANGSTROM_PER_DEBYE: f64 = 0.2081943;

/// A partial charge on one atom.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialCharge {
    /// Atom label "symbol_index" (e.g. "O_1"), index 1-based in source order.
    pub atom: String,
    /// Natural charge in units of e.
    pub charge: f64,
}

/// Extracts per-atom natural charges from the "Summary of Natural Population
/// Analysis" table.
///
/// The atom count is taken from the document's own orientation table, so the
/// returned charges are ordered and indexed consistently with
/// [`extract_coordinates`].
///
/// # Errors
///
/// [`ToolboxError::SectionNotFound`] when the log has no population summary,
/// [`ToolboxError::Malformed`] when the table is shorter than the atom count
/// or a row cannot be decoded.
pub fn nbo_charges(doc: &LogDocument) -> Result<Vec<PartialCharge>> {
    let atom_count = extract_coordinates(doc, SourceFormat::CalculationLog)?.num_atoms;

    // Six header lines sit between the marker and the first atom row.
    let section = doc
        .view()
        .after("Summary of Natural Population Analysis", 6)
        .ok_or_else(|| doc.missing("Summary of Natural Population Analysis"))?;

    let lines = section.lines();
    if lines.len() < atom_count {
        return Err(doc.malformed(
            section.start_line(),
            format!("population table shorter than {} atoms", atom_count),
        ));
    }

    let mut charges = Vec::with_capacity(atom_count);
    for (offset, line) in lines.iter().take(atom_count).enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(doc.malformed(section.start_line() + offset, "population row"));
        }
        let charge: f64 = parts[2]
            .parse()
            .map_err(|_| doc.malformed(section.start_line() + offset, "natural charge"))?;
        charges.push(PartialCharge {
            atom: format!("{}_{}", parts[0], parts[1]),
            charge,
        });
    }
    Ok(charges)
}

/// Origin choice for multipole moment evaluation.
///
/// The dipole could be translated after the fact but the quadrupole cannot,
/// so the origin has to be fixed before evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentOrigin {
    /// Center of charge of the system (the default).
    CenterOfCharge,
    /// The position of one atom, by 0-based index.
    Atom(usize),
    /// An explicit Cartesian point in Angstroms.
    Point([f64; 3]),
}

/// Dipole and quadrupole moments derived from NBO charges and coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipoleMoments {
    /// Magnitude of the dipole moment, in Debye.
    pub dipole: f64,
    /// Scalar quadrupole moment, in Debye*Angstrom.
    pub quadrupole: f64,
}

/// Computes dipole and quadrupole moments of the molecule in a log from its
/// NBO charges and extracted coordinates.
///
/// # Errors
///
/// Extraction errors from [`nbo_charges`]/[`extract_coordinates`], or
/// [`ToolboxError::Inconsistent`] for an out-of-range atom-index origin.
pub fn multipole_moments(doc: &LogDocument, origin: MomentOrigin) -> Result<MultipoleMoments> {
    let geometry = extract_coordinates(doc, SourceFormat::CalculationLog)?;
    let charges: Vec<f64> = nbo_charges(doc)?.into_iter().map(|p| p.charge).collect();

    let positions: Vec<Vector3<f64>> = (0..geometry.num_atoms)
        .map(|i| Vector3::from(geometry.get_atom_coords(i)))
        .collect();

    let origin = match origin {
        MomentOrigin::CenterOfCharge => weighted_center(&positions, &charges)?,
        MomentOrigin::Atom(idx) => {
            if idx >= positions.len() {
                return Err(ToolboxError::Inconsistent {
                    what: format!(
                        "origin atom index {} out of range for {} atoms",
                        idx,
                        positions.len()
                    ),
                });
            }
            positions[idx]
        }
        MomentOrigin::Point(p) => Vector3::from(p),
    };

    let recentered: Vec<Vector3<f64>> = positions.iter().map(|p| p - origin).collect();

    let dipole_vector: Vector3<f64> = recentered
        .iter()
        .zip(&charges)
        .map(|(r, q)| r * *q)
        .sum();
    let dipole = dipole_vector.norm() / E_ANGSTROM_PER_DEBYE;

    let mut tensor = Matrix3::zeros();
    for (r, q) in recentered.iter().zip(&charges) {
        tensor += r * r.transpose() * *q;
    }
    let trace = tensor.trace();
    tensor *= 1.5;
    for j in 0..3 {
        tensor[(j, j)] -= trace / 2.0;
    }
    let contraction: f64 = tensor.iter().map(|t| t * t).sum();
    let quadrupole = (2.0 * contraction / 3.0).sqrt() / E_ANGSTROM_PER_DEBYE;

    Ok(MultipoleMoments { dipole, quadrupole })
}

/// Center of a set of positions under a weighting (masses give the center of
/// mass, charges the center of charge).
///
/// # Errors
///
/// [`ToolboxError::Inconsistent`] when the arrays differ in length or the
/// total weight is zero.
pub fn weighted_center(positions: &[Vector3<f64>], weights: &[f64]) -> Result<Vector3<f64>> {
    if positions.len() != weights.len() {
        return Err(ToolboxError::Inconsistent {
            what: format!(
                "{} positions but {} weights",
                positions.len(),
                weights.len()
            ),
        });
    }
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Err(ToolboxError::Inconsistent {
            what: "total weight is zero".to_string(),
        });
    }
    let weighted: Vector3<f64> = positions.iter().zip(weights).map(|(p, w)| p * *w).sum();
    Ok(weighted / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_log_with_nbo() -> String {
        "\
 Optimization complete.
                         Input orientation:
 ---------------------------------------------------------------------
 Center     Atomic      Atomic             Coordinates (Angstroms)
 Number     Number       Type             X           Y           Z
 ---------------------------------------------------------------------
      1          8           0        0.000000    0.000000    0.117790
      2          1           0        0.000000    0.755450   -0.471160
      3          1           0        0.000000   -0.755450   -0.471160
 ---------------------------------------------------------------------
                    Distance matrix (angstroms):
 Summary of Natural Population Analysis:

                                       Natural Population
                Natural  -----------------------------------------------
    Atom  No    Charge         Core      Valence    Rydberg      Total
 -----------------------------------------------------------------------
      O    1   -0.92005      1.99941     7.91623    0.00440     9.92005
      H    2    0.46002      0.00000     0.53820    0.00178     0.53998
      H    3    0.46002      0.00000     0.53820    0.00178     0.53998
 Normal termination of Gaussian
"
        .to_string()
    }

    #[test]
    fn test_nbo_charges() {
        let doc = LogDocument::from_text("<nbo>", &water_log_with_nbo());
        let charges = nbo_charges(&doc).unwrap();
        assert_eq!(charges.len(), 3);
        assert_eq!(charges[0].atom, "O_1");
        assert!((charges[0].charge + 0.92005).abs() < 1e-12);
        assert!((charges[1].charge - 0.46002).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_center() {
        let positions = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)];
        let center = weighted_center(&positions, &[1.0, 1.0]).unwrap();
        assert!((center.x - 1.0).abs() < 1e-12);

        assert!(weighted_center(&positions, &[1.0]).is_err());
    }

    #[test]
    fn test_multipole_moments_water() {
        let doc = LogDocument::from_text("<nbo>", &water_log_with_nbo());
        // Anchor the origin on the oxygen: the center of charge of a
        // near-neutral system is numerically ill-conditioned.
        let moments = multipole_moments(&doc, MomentOrigin::Atom(0)).unwrap();
        // Hand evaluation: both H charges sit symmetrically about the z
        // axis, so the dipole is 2 * 0.46002 * 0.58895 / 0.2081943 Debye.
        let expected = 2.0 * 0.46002 * (0.471160 + 0.117790) / 0.2081943;
        assert!((moments.dipole - expected).abs() < 1e-6);
        assert!(moments.quadrupole > 0.0);
    }

    #[test]
    fn test_origin_atom_out_of_range() {
        let doc = LogDocument::from_text("<nbo>", &water_log_with_nbo());
        assert!(multipole_moments(&doc, MomentOrigin::Atom(9)).is_err());
    }
}
