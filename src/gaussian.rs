//! Gaussian 16 input synthesis.
//!
//! Builds the two-stage job pair of the workflow from an extracted geometry:
//! a gas-phase opt/freq input and a PCM continuation input that reads the
//! converged wavefunction and geometry from the gas-phase checkpoint.
//!
//! Route strings are caller-supplied keyword lines (everything after the
//! `# `). The PCM route is augmented with the implicit-solvent keywords and
//! the checkpoint-geometry directive only when they are not already present,
//! so re-running the synthesis over an already-augmented route changes
//! nothing.

use crate::error::{Result, ToolboxError};
use crate::geometry::{format_atom_line, Geometry};
use crate::naming::FileNaming;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Implicit-solvent keywords appended to PCM route sections: IEF-PCM water
/// with external iteration, vacuum first cycle, and a read section for the
/// dis/cav/rep energy terms.
pub const PCM_SOLVENT_KEYWORDS: &str = "scrf=(iefpcm,solvent=water,externaliteration,1stvac,read)";

/// Charge and spin state of the synthesized inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeSpin {
    /// Total formal charge of the system.
    pub charge: i32,
    /// Spin multiplicity 2S+1.
    pub spin_multiplicity: u32,
}

impl Default for ChargeSpin {
    fn default() -> Self {
        Self {
            charge: 0,
            spin_multiplicity: 1,
        }
    }
}

/// Appends the implicit-solvent and checkpoint-geometry keywords to a PCM
/// route section unless already present.
///
/// The check is by keyword substring, so any caller-specified `scrf=(...)`
/// variant suppresses the default solvent block. Applying this function
/// twice yields the same string as applying it once.
///
/// # Examples
///
/// ```
/// use dft_toolbox::gaussian::augment_pcm_route;
///
/// let once = augment_pcm_route("b3lyp/aug-cc-pvdz empiricaldispersion=gd3");
/// let twice = augment_pcm_route(&once);
/// assert_eq!(once, twice);
/// ```
pub fn augment_pcm_route(route: &str) -> String {
    let mut route = route.to_string();
    if !route.contains("scrf") {
        route.push(' ');
        route.push_str(PCM_SOLVENT_KEYWORDS);
    }
    if !route.contains("geom=check") {
        route.push_str(" geom=check");
    }
    route
}

/// Builds the gas-phase input file content.
fn gas_input(naming: &FileNaming, gas_route: &str, geometry: &Geometry, cs: ChargeSpin) -> String {
    let mut content = format!(
        "%chk={}\n# {}\n\nG16 gas-phase opt/freq job for {}\n\n{} {}\n",
        naming.gas_chk(),
        gas_route,
        naming.basename(),
        cs.charge,
        cs.spin_multiplicity
    );
    for atom in geometry.atoms() {
        content.push_str(&format_atom_line(atom.symbol, atom.position));
        content.push('\n');
    }
    content.push('\n');
    content
}

/// Builds the PCM continuation input file content. The geometry comes from
/// the gas-phase checkpoint, so the body carries only the dis/cav/rep read
/// section.
fn pcm_input(naming: &FileNaming, pcm_route: &str, cs: ChargeSpin) -> String {
    format!(
        "%oldchk={}\n%chk={}\n# {}\n\nG16 PCM job for {}\n\n{} {}\n\ndis\ncav\nrep\n\n\n",
        naming.gas_chk(),
        naming.pcm_chk(),
        augment_pcm_route(pcm_route),
        naming.basename(),
        cs.charge,
        cs.spin_multiplicity
    )
}

/// Writes the gas-phase and PCM input pair for one job.
///
/// `job` is the job path without extension; its stem names every derived
/// file. Returns the paths of the two written inputs.
///
/// # Errors
///
/// [`ToolboxError::Io`] when either file cannot be written.
pub fn create_g16_input(
    job: &Path,
    gas_route: &str,
    pcm_route: &str,
    geometry: &Geometry,
    cs: ChargeSpin,
) -> Result<(PathBuf, PathBuf)> {
    let naming = FileNaming::new(job);
    let dir = job.parent().unwrap_or_else(|| Path::new(""));

    let gas_path = dir.join(naming.gas_com());
    let pcm_path = dir.join(naming.pcm_com());

    let write = |path: &Path, content: String| -> Result<()> {
        fs::write(path, content).map_err(|source| ToolboxError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    write(&gas_path, gas_input(&naming, gas_route, geometry, cs))?;
    write(&pcm_path, pcm_input(&naming, pcm_route, cs))?;
    info!(
        "wrote {} and {} ({} atoms)",
        gas_path.display(),
        pcm_path.display(),
        geometry.num_atoms
    );
    Ok((gas_path, pcm_path))
}
