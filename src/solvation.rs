//! Continuum-solvation free energies.
//!
//! Covers the two solvation quantities of the workflow: extracting the PCM
//! solvation free energy printed by an externaliteration SCRF calculation,
//! and combining it with gas-phase free energies into a free energy in
//! solution via the pQCT monomer cycle.

use crate::error::Result;
use crate::logfile::LogDocument;
use crate::thermo::GAS_CONSTANT;

/// Free energy of solvation of a single water molecule in kcal/mol,
/// calculated with IEF-PCM at RB3LYP-D3/aug-cc-pVDZ including cavitation
/// and dispersion-repulsion energies.
pub const DG_SOLV_WATER: f64 = -1.34;

/// Extracts the continuum-solvent solvation free energy (kcal/mol) from a
/// PCM calculation log.
///
/// The value is taken from the last "DeltaG (solv)" line, which in an
/// externaliteration job is the converged one.
///
/// # Errors
///
/// [`crate::error::ToolboxError::SectionNotFound`] when the log contains no
/// "DeltaG (solv)" line, [`crate::error::ToolboxError::Malformed`] when the
/// line cannot be decoded.
pub fn pcm_solvation_energy(doc: &LogDocument) -> Result<f64> {
    let mut result = None;
    for (num, line) in doc.lines().iter().enumerate() {
        if !line.contains("DeltaG (solv)") {
            continue;
        }
        // " DeltaG (solv) (kcal/mol)            =     -8.71"
        let value: f64 = line
            .split_whitespace()
            .nth(4)
            .ok_or_else(|| doc.malformed(num, "DeltaG (solv) line"))?
            .parse()
            .map_err(|_| doc.malformed(num, "DeltaG (solv) value"))?;
        result = Some(value);
    }
    result.ok_or_else(|| doc.missing("DeltaG (solv)"))
}

/// Free energy in solution (kcal/mol) by the pQCT method, monomer cycle.
///
/// Combines the gas-phase free energy of a solute-water cluster with the
/// cluster's PCM solvation free energy, removing `n_water` gas-phase water
/// molecules with their own solvation free energy and the 1 mol/L -> 55.5
/// mol/L concentration correction. Standard-state corrections (RT ln 24.46)
/// are applied to both cluster and waters.
///
/// To obtain the free energy *of solvation*, subtract from the result the
/// gas-phase free energy of the bare solute at the same level of theory plus
/// the gas-phase standard-state correction.
pub fn free_energy_in_solution(
    gas_free_energy_cluster: f64,
    gas_free_energy_water: f64,
    pcm_dg_solv: f64,
    n_water: usize,
    dg_solv_water: f64,
    temp: f64,
) -> f64 {
    let n = n_water as f64;
    let rt = GAS_CONSTANT * temp;
    (gas_free_energy_cluster + rt * 24.46_f64.ln())
        - n * (gas_free_energy_water + rt * 24.46_f64.ln())
        + pcm_dg_solv
        - n * dg_solv_water
        - n * rt * (1000.0 / 18.01528_f64).ln()
}
