//! Derived file naming for multi-stage jobs.
//!
//! All files of one job (gas-phase input, PCM continuation, checkpoints,
//! submission script, logs) are named from a single basename, so several
//! jobs can share a working directory without colliding.

use std::path::Path;

/// Generates the file names belonging to one job basename.
#[derive(Debug, Clone)]
pub struct FileNaming {
    basename: String,
}

impl FileNaming {
    /// Creates a naming scheme from a job path; the file stem becomes the
    /// basename.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use dft_toolbox::naming::FileNaming;
    ///
    /// let naming = FileNaming::new(Path::new("runs/sim001"));
    /// assert_eq!(naming.basename(), "sim001");
    /// assert_eq!(naming.gas_com(), "sim001_gas.com");
    /// assert_eq!(naming.pcm_chk(), "sim001_PCM.chk");
    /// ```
    pub fn new(path: &Path) -> Self {
        let basename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sim")
            .to_string();
        Self { basename }
    }

    /// The basename shared by all derived names.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Gas-phase opt/freq input file: `{basename}_gas.com`.
    pub fn gas_com(&self) -> String {
        format!("{}_gas.com", self.basename)
    }

    /// PCM continuation input file: `{basename}_PCM.com`.
    pub fn pcm_com(&self) -> String {
        format!("{}_PCM.com", self.basename)
    }

    /// Gas-phase checkpoint: `{basename}_gas.chk`.
    pub fn gas_chk(&self) -> String {
        format!("{}_gas.chk", self.basename)
    }

    /// PCM checkpoint: `{basename}_PCM.chk`.
    pub fn pcm_chk(&self) -> String {
        format!("{}_PCM.chk", self.basename)
    }

    /// SLURM submission script: `{basename}.slurm`.
    pub fn slurm(&self) -> String {
        format!("{}.slurm", self.basename)
    }

    /// Standard output capture: `stout_{basename}.txt`.
    pub fn stdout_log(&self) -> String {
        format!("stout_{}.txt", self.basename)
    }

    /// Standard error capture: `sterr_{basename}.txt`.
    pub fn stderr_log(&self) -> String {
        format!("sterr_{}.txt", self.basename)
    }

    /// Arkane species descriptor: `{basename}.py`.
    pub fn species_py(&self) -> String {
        format!("{}.py", self.basename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_from_path_with_extension() {
        let naming = FileNaming::new(Path::new("clusters/na_3w.xyz"));
        assert_eq!(naming.basename(), "na_3w");
        assert_eq!(naming.pcm_com(), "na_3w_PCM.com");
        assert_eq!(naming.slurm(), "na_3w.slurm");
        assert_eq!(naming.stderr_log(), "sterr_na_3w.txt");
    }
}
