//! Arkane thermochemistry input assembly.
//!
//! Arkane (RMG-Py) fits NASA polynomials from Gaussian frequency jobs. Its
//! input is split across one `.py` descriptor per species and a composite
//! `input.py` that declares the level of theory once and then lists one
//! `species`/`thermo` stanza per molecule. This module writes both pieces:
//! the species descriptor is derived from the frequency log (symmetry number
//! read from the "Rotational symmetry number" line, energies optionally
//! redirected to a PCM log), and the composite file is created with its
//! header on first use and appended to afterwards.
//!
//! The composite file is a shared, accumulating resource; callers that
//! process molecules concurrently must serialize their appends themselves.
//!
//! Atom energies and frequency scale factors for supported levels of theory
//! ship with the crate as JSON; unsupported combinations get placeholder
//! slots for the user to fill.

use crate::error::{Result, ToolboxError};
use crate::logfile::LogDocument;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bundled atom-energy data sets, keyed "method_basis".
const ATOM_ENERGY_DATA: &[(&str, &str)] = &[(
    "B3LYP_aug-cc-pVDZ",
    include_str!("../data/atom_energies/B3LYP_aug-cc-pVDZ.json"),
)];

#[derive(Debug, Deserialize)]
struct AtomEnergyData {
    #[serde(rename = "atomEnergies")]
    atom_energies: BTreeMap<String, f64>,
    #[serde(rename = "frequencyScaleFactor")]
    frequency_scale_factor: Option<f64>,
}

/// One species submitted to Arkane.
#[derive(Debug, Clone)]
pub struct SpeciesSpec {
    /// Species name; also names the descriptor file.
    pub name: String,
    /// Relative path of the frequency calculation log.
    pub freq_log: String,
    /// Optional PCM log whose energy supersedes the gas-phase one.
    pub pcm_log: Option<String>,
    /// True for linear molecules (D-infinity-h or C-infinity-v symmetry).
    pub linear: bool,
    /// Spin multiplicity 2S+1.
    pub spin_multiplicity: u32,
    /// Number of optical isomers; 1 means no chirality.
    pub optical_isomers: u32,
}

impl SpeciesSpec {
    /// A non-linear closed-shell achiral species.
    pub fn new(name: &str, freq_log: &str) -> Self {
        Self {
            name: name.to_string(),
            freq_log: freq_log.to_string(),
            pcm_log: None,
            linear: false,
            spin_multiplicity: 1,
            optical_isomers: 1,
        }
    }
}

/// Level of theory declared in the composite input header.
#[derive(Debug, Clone, Default)]
pub struct LevelOfTheory {
    /// Method name (e.g. "B3LYP"); placeholder slot when absent.
    pub method: Option<String>,
    /// Basis set name (e.g. "aug-cc-pVDZ"); placeholder slot when absent.
    pub basis: Option<String>,
}

/// Reads the rotational symmetry number from a frequency log.
///
/// Gaussian prints it as " Rotational symmetry number  2."; the trailing
/// period is dropped before the integer parse. The last occurrence wins, in
/// line with the other converged-value extractors.
///
/// # Errors
///
/// [`ToolboxError::SectionNotFound`] when the log has no symmetry line,
/// [`ToolboxError::Malformed`] when the value cannot be decoded.
pub fn rotational_symmetry(doc: &LogDocument) -> Result<u32> {
    let mut result = None;
    for (num, line) in doc.lines().iter().enumerate() {
        if !line.contains("Rotational symmetry number") {
            continue;
        }
        let token = line
            .split_whitespace()
            .nth(3)
            .ok_or_else(|| doc.malformed(num, "rotational symmetry line"))?;
        let value: u32 = token
            .trim_end_matches('.')
            .parse()
            .map_err(|_| doc.malformed(num, "rotational symmetry number"))?;
        result = Some(value);
    }
    result.ok_or_else(|| doc.missing("Rotational symmetry number"))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| ToolboxError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the per-species descriptor `{name}.py` into `dir` and returns its
/// path.
///
/// Geometry and frequencies always come from the frequency log; the energy
/// is redirected to the PCM log when one is given.
pub fn write_species_file(dir: &Path, spec: &SpeciesSpec, symmetry: u32) -> Result<PathBuf> {
    let energy_log = spec.pcm_log.as_deref().unwrap_or(&spec.freq_log);
    let linear = if spec.linear { "True" } else { "False" };
    let content = format!(
        "linear = {}\n\n\
         externalSymmetry = {}\n\n\
         spinMultiplicity = {}\n\n\
         opticalIsomers = {}\n\n\
         energy = Log('{}')\n\n\
         geometry = Log('{}')\n\n\
         frequencies = Log('{}')\n\n",
        linear,
        symmetry,
        spec.spin_multiplicity,
        spec.optical_isomers,
        energy_log,
        spec.freq_log,
        spec.freq_log
    );
    let path = dir.join(format!("{}.py", spec.name));
    write_file(&path, &content)?;
    Ok(path)
}

/// Renders the composite-input header: level of theory, atom energies, and
/// frequency scale factor.
///
/// When the method/basis combination matches a bundled data set the real
/// values are inlined; otherwise placeholder slots are emitted and the scale
/// factor line is left commented out.
pub fn render_input_header(lot: &LevelOfTheory) -> String {
    let method = lot.method.as_deref().unwrap_or("ProvideMethodHere");
    let basis = lot.basis.as_deref().unwrap_or("ProvideBasisHere");
    let key = format!("{}_{}", method, basis);

    let data = if lot.method.is_some() && lot.basis.is_some() {
        let parsed = ATOM_ENERGY_DATA
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, json)| serde_json::from_str::<AtomEnergyData>(json));
        match parsed {
            Some(Ok(data)) => Some(data),
            Some(Err(e)) => {
                warn!("bundled atom energies for {} are unreadable: {}", key, e);
                None
            }
            None => {
                warn!("no bundled atom energies for {}", key);
                None
            }
        }
    } else {
        None
    };

    let mut lines = String::new();
    lines.push_str(&format!(
        "LevelOfTheory(method='{}',basis='{}')\n\n",
        method, basis
    ));
    lines.push_str("atomEnergies = {\n");
    match &data {
        Some(data) => {
            for (atom, energy) in &data.atom_energies {
                lines.push_str(&format!("    '{}': {},\n", atom, energy));
            }
        }
        None => lines.push_str("    'AtomID': EnergyHere,\n"),
    }
    lines.push_str("}\n\n");
    match data.as_ref().and_then(|d| d.frequency_scale_factor) {
        Some(factor) => lines.push_str(&format!("frequencyScaleFactor = {}\n", factor)),
        None => lines.push_str("#frequencyScaleFactor = \n"),
    }
    lines
}

fn has_header(content: &str) -> bool {
    content.lines().any(|line| {
        line.contains("LevelOfTheory")
            || line.contains("atomEnergies")
            || line.contains("frequencyScaleFactor")
    })
}

/// Creates the full Arkane input for one species in `dir`: the species
/// descriptor plus a `species`/`thermo` stanza appended to the composite
/// `input.py` (written with its header first when absent).
///
/// # Errors
///
/// Extraction errors from the frequency log, or [`ToolboxError::Io`] for any
/// file that cannot be written.
pub fn create_arkane_input(dir: &Path, spec: &SpeciesSpec, lot: &LevelOfTheory) -> Result<PathBuf> {
    let freq_doc = LogDocument::read(&dir.join(&spec.freq_log))?;
    let symmetry = rotational_symmetry(&freq_doc)?;
    write_species_file(dir, spec, symmetry)?;

    let input_path = dir.join("input.py");
    let existing = match fs::read_to_string(&input_path) {
        Ok(content) => content,
        Err(_) => String::new(),
    };
    if existing.is_empty() || !has_header(&existing) {
        write_file(&input_path, &render_input_header(lot))?;
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&input_path)
        .map_err(|source| ToolboxError::Io {
            path: input_path.clone(),
            source,
        })?;
    write!(
        file,
        "\n\nspecies('{0}', '{0}.py')\nthermo('{0}', 'NASA')\n\n",
        spec.name
    )
    .map_err(|source| ToolboxError::Io {
        path: input_path.clone(),
        source,
    })?;
    Ok(input_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotational_symmetry() {
        let doc = LogDocument::from_text(
            "<freq>",
            " Full point group      C2V\n Rotational symmetry number  2.\n",
        );
        assert_eq!(rotational_symmetry(&doc).unwrap(), 2);
    }

    #[test]
    fn test_rotational_symmetry_missing() {
        let doc = LogDocument::from_text("<freq>", "no symmetry info\n");
        assert!(rotational_symmetry(&doc).is_err());
    }

    #[test]
    fn test_header_with_bundled_energies() {
        let lot = LevelOfTheory {
            method: Some("B3LYP".to_string()),
            basis: Some("aug-cc-pVDZ".to_string()),
        };
        let header = render_input_header(&lot);
        assert!(header.contains("LevelOfTheory(method='B3LYP',basis='aug-cc-pVDZ')"));
        assert!(header.contains("'O': -75.077162,"));
        assert!(header.contains("frequencyScaleFactor = 0.97"));
        assert!(has_header(&header));
    }

    #[test]
    fn test_header_placeholders_without_data() {
        let header = render_input_header(&LevelOfTheory::default());
        assert!(header.contains("ProvideMethodHere"));
        assert!(header.contains("'AtomID': EnergyHere,"));
        assert!(header.contains("#frequencyScaleFactor"));
    }
}
