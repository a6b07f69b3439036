//! SLURM submission script synthesis.
//!
//! Plain text assembly of the batch script that runs the gas-phase and PCM
//! stages of one job on the cluster. The template is fixed; the caller fills
//! the substitution slots (job name, resources, partition, file names) and
//! everything else, the Gaussian environment setup in particular, is
//! emitted verbatim.

use crate::error::{Result, ToolboxError};
use crate::naming::FileNaming;
use std::fs;
use std::path::{Path, PathBuf};

/// Default wallclock limit: seven days.
pub const DEFAULT_TIME: &str = "168:00:00";

/// Substitution slots of the submission script template.
#[derive(Debug, Clone)]
pub struct SlurmJob {
    /// Job name shown in the queue; also names the log files.
    pub job_name: String,
    /// Gaussian input basename (relative to the submission directory),
    /// without the `_gas.com`/`_PCM.com` suffix.
    pub input: String,
    /// Number of nodes requested.
    pub nodes: u32,
    /// Partition to schedule on.
    pub partition: String,
    /// Memory request in GB.
    pub mem_gb: u32,
    /// Wallclock limit, HH:MM:SS.
    pub time: String,
    /// Standard output capture file.
    pub stdout: String,
    /// Standard error capture file.
    pub stderr: String,
    /// Directory for the Gaussian .log files.
    pub log_path: String,
}

impl SlurmJob {
    /// Builds a job description for `job` with the default file names and
    /// wallclock limit.
    pub fn new(job: &Path, nodes: u32, partition: &str, mem_gb: u32) -> Self {
        let naming = FileNaming::new(job);
        let log_path = job
            .parent()
            .and_then(|p| p.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            job_name: naming.basename().to_string(),
            input: naming.basename().to_string(),
            nodes,
            partition: partition.to_string(),
            mem_gb,
            time: DEFAULT_TIME.to_string(),
            stdout: naming.stdout_log(),
            stderr: naming.stderr_log(),
            log_path,
        }
    }

    /// Renders the submission script text.
    pub fn render(&self) -> String {
        let log_prefix = if self.log_path.is_empty() {
            String::new()
        } else {
            format!("{}/", self.log_path)
        };
        format!(
            "#!/bin/bash\n\
             #SBATCH --job-name=\"{job_name}\"\n\
             #SBATCH --nodes={nodes}                         # number of nodes\n\
             #SBATCH --mem={mem}G                         # memory pool for all cores\n\
             #SBATCH -t {time}                       # time (HH:MM:SS)\n\
             #SBATCH --output=\"{stdout}\"         # standard output\n\
             #SBATCH --error=\"{stderr}\"          # standard error\n\
             #SBATCH --ntasks-per-node=1\n\
             #SBATCH -p {partition}\n\
             \n\
             input='{input}'\n\
             log_path=\"{log_path}\"\n\
             \n\
             module load gaussian/g16\n\
             export GAUSS_SCRDIR=$TMPDIR\n\
             export GAUSS_CDEF=0-$(($SLURM_CPUS_ON_NODE - 1))\n\
             export GAUSS_MDEF=${{SLURM_MEM_PER_NODE}}MB\n\
             \n\
             g16 < ${{input}}_gas.com > {log_prefix}${{SLURM_JOB_NAME}}_gas.log\n\
             g16 < ${{input}}_PCM.com > {log_prefix}${{SLURM_JOB_NAME}}_PCM.log\n",
            job_name = self.job_name,
            nodes = self.nodes,
            mem = self.mem_gb,
            time = self.time,
            stdout = self.stdout,
            stderr = self.stderr,
            partition = self.partition,
            input = self.input,
            log_path = self.log_path,
            log_prefix = log_prefix,
        )
    }
}

/// Writes the submission script for `job` next to its input files and
/// returns the script path.
///
/// # Errors
///
/// [`ToolboxError::Io`] when the script cannot be written.
pub fn create_slurm_script(job: &Path, slurm: &SlurmJob) -> Result<PathBuf> {
    let naming = FileNaming::new(job);
    let dir = job.parent().unwrap_or_else(|| Path::new(""));
    let path = dir.join(naming.slurm());
    fs::write(&path, slurm.render()).map_err(|source| ToolboxError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_all_slots() {
        let job = SlurmJob::new(Path::new("runs/sim001"), 1, "general", 32);
        let script = job.render();
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("#SBATCH --job-name=\"sim001\""));
        assert!(script.contains("#SBATCH --nodes=1"));
        assert!(script.contains("#SBATCH --mem=32G"));
        assert!(script.contains("#SBATCH -t 168:00:00"));
        assert!(script.contains("#SBATCH --output=\"stout_sim001.txt\""));
        assert!(script.contains("#SBATCH --error=\"sterr_sim001.txt\""));
        assert!(script.contains("#SBATCH -p general"));
        assert!(script.contains("input='sim001'"));
        assert!(script.contains("log_path=\"runs\""));
        assert!(script.contains("${input}_gas.com"));
        assert!(script.contains("${input}_PCM.com"));
    }

    #[test]
    fn test_render_without_log_dir() {
        let job = SlurmJob::new(Path::new("sim001"), 2, "long", 64);
        let script = job.render();
        assert!(script.contains("log_path=\"\""));
        assert!(script.contains("> ${SLURM_JOB_NAME}_gas.log"));
    }
}
