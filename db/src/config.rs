//! Data-source configuration.
//!
//! Lists the directories searched for `debian.csv` and `ubuntu.csv`, in
//! order. The file is YAML:
//!
//! ```yaml
//! data_dirs:
//!   - /opt/distro-info
//!   - /usr/share/distro-info
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::csv::Distro;
use crate::error::Result;
use crate::loader::DataBuilder;

/// System-wide location of the release datasets.
pub const DEFAULT_DATA_DIR: &str = "/usr/share/distro-info";

/// Where release datasets are looked up.
///
/// # Examples
///
/// ```
/// use distro_info_db::{DataConfig, DEFAULT_DATA_DIR};
///
/// let config = DataConfig::default();
/// assert_eq!(config.data_dirs, [std::path::PathBuf::from(DEFAULT_DATA_DIR)]);
///
/// let config: DataConfig = serde_yaml::from_str("data_dirs: [/opt/distro-info]").unwrap();
/// assert_eq!(config.data_dirs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directories searched in order; the first one holding the dataset wins.
    #[serde(default = "default_data_dirs")]
    pub data_dirs: Vec<PathBuf>,
}

fn default_data_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_DATA_DIR)]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dirs: default_data_dirs(),
        }
    }
}

impl DataConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::DatabaseError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::DatabaseError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// A loader over the configured directories.
    pub fn builder(&self, distro: Distro) -> DataBuilder {
        self.data_dirs
            .iter()
            .fold(DataBuilder::new(distro), |builder, dir| builder.from_dir(dir))
    }
}
