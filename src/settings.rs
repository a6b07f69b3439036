//! Configuration management for dft-toolbox.
//!
//! HPC and synthesis defaults are read from INI-format configuration files
//! with the following precedence:
//!
//! 1. Local configuration (`./dft_toolbox.cfg`)
//! 2. User configuration (`~/.config/dft-toolbox/dft_toolbox.cfg`)
//! 3. Built-in defaults
//!
//! # Configuration File Format
//!
//! ```ini
//! [hpc]
//! partition = general
//! nodes = 1
//! mem_gb = 32
//! time = 168:00:00
//!
//! [synthesis]
//! charge = 0
//! spin_multiplicity = 1
//!
//! [logging]
//! level = info
//! ```

use configparser::ini::Ini;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading and processing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading configuration files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// INI parsing error
    #[error("INI parsing error: {0}")]
    IniParse(String),
}

/// All program settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Cluster resource defaults for submission scripts
    pub hpc: HpcSettings,
    /// Defaults for input synthesis
    pub synthesis: SynthesisSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Cluster resource defaults used when a submission script slot is not given
/// on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HpcSettings {
    /// Partition to schedule on (default: "general")
    pub partition: String,
    /// Number of nodes (default: 1)
    pub nodes: u32,
    /// Memory request in GB (default: 32)
    pub mem_gb: u32,
    /// Wallclock limit (default: "168:00:00", seven days)
    pub time: String,
}

impl Default for HpcSettings {
    fn default() -> Self {
        Self {
            partition: "general".to_string(),
            nodes: 1,
            mem_gb: 32,
            time: crate::slurm::DEFAULT_TIME.to_string(),
        }
    }
}

/// Input synthesis defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// Total formal charge (default: 0)
    pub charge: i32,
    /// Spin multiplicity 2S+1 (default: 1)
    pub spin_multiplicity: u32,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            charge: 0,
            spin_multiplicity: 1,
        }
    }
}

/// Logging configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (default: "info")
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Loads, merges and serves configuration values.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: Settings,
    source: String,
}

impl SettingsManager {
    /// Loads settings with local -> user -> defaults precedence.
    pub fn load() -> Result<Self, ConfigError> {
        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                info!("loading settings from {}", candidate.display());
                return Self::from_file(&candidate);
            }
            debug!("no settings file at {}", candidate.display());
        }
        Ok(Self {
            settings: Settings::default(),
            source: "built-in defaults".to_string(),
        })
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("dft_toolbox.cfg")];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("dft-toolbox")
                    .join("dft_toolbox.cfg"),
            );
        }
        paths
    }

    /// Loads settings from one INI file; unset keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.load(path).map_err(ConfigError::IniParse)?;

        let mut settings = Settings::default();

        if let Some(value) = ini.get("hpc", "partition") {
            settings.hpc.partition = value;
        }
        if let Ok(Some(value)) = ini.getuint("hpc", "nodes") {
            settings.hpc.nodes = value as u32;
        }
        if let Ok(Some(value)) = ini.getuint("hpc", "mem_gb") {
            settings.hpc.mem_gb = value as u32;
        }
        if let Some(value) = ini.get("hpc", "time") {
            settings.hpc.time = value;
        }
        if let Ok(Some(value)) = ini.getint("synthesis", "charge") {
            settings.synthesis.charge = value as i32;
        }
        if let Ok(Some(value)) = ini.getuint("synthesis", "spin_multiplicity") {
            settings.synthesis.spin_multiplicity = value as u32;
        }
        if let Some(value) = ini.get("logging", "level") {
            settings.logging.level = value;
        }

        Ok(Self {
            settings,
            source: path.display().to_string(),
        })
    }

    /// Where the active settings came from.
    pub fn config_source(&self) -> &str {
        &self.source
    }

    /// Cluster resource defaults.
    pub fn hpc(&self) -> &HpcSettings {
        &self.settings.hpc
    }

    /// Input synthesis defaults.
    pub fn synthesis(&self) -> &SynthesisSettings {
        &self.settings.synthesis
    }

    /// Logging configuration.
    pub fn logging(&self) -> &LoggingSettings {
        &self.settings.logging
    }

    /// Writes a commented template configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn create_template(path: &Path) -> Result<(), ConfigError> {
        let template = "\
# dft-toolbox configuration
#
# Values here provide the defaults for input and submission script
# synthesis; command-line arguments override them.

[hpc]
# Partition to schedule Gaussian jobs on
partition = general
# Number of nodes per job
nodes = 1
# Memory request in GB
mem_gb = 32
# Wallclock limit (HH:MM:SS)
time = 168:00:00

[synthesis]
# Total formal charge of the system
charge = 0
# Spin multiplicity (2S+1)
spin_multiplicity = 1

[logging]
# error | warn | info | debug | trace
level = info
";
        std::fs::write(path, template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.hpc.partition, "general");
        assert_eq!(settings.hpc.nodes, 1);
        assert_eq!(settings.synthesis.spin_multiplicity, 1);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_from_file_overrides_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dft_toolbox.cfg");
        std::fs::write(&path, "[hpc]\npartition = long\nmem_gb = 64\n").unwrap();

        let manager = SettingsManager::from_file(&path).unwrap();
        assert_eq!(manager.hpc().partition, "long");
        assert_eq!(manager.hpc().mem_gb, 64);
        // Unset keys keep their defaults.
        assert_eq!(manager.hpc().nodes, 1);
        assert_eq!(manager.hpc().time, "168:00:00");
    }

    #[test]
    fn test_template_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dft_toolbox.cfg");
        SettingsManager::create_template(&path).unwrap();
        let manager = SettingsManager::from_file(&path).unwrap();
        assert_eq!(manager.hpc().partition, "general");
        assert_eq!(manager.synthesis().charge, 0);
    }
}
