//! Release data loading with builder pattern and fallback chains.
//!
//! Provides [`DistroData`], a parsed release table together with where it
//! came from, and [`DataBuilder`] for trying several locations in order.
//!
//! # Loading patterns
//!
//! ```no_run
//! use distro_info_db::{Distro, DistroData};
//!
//! // Load a single dataset file
//! let data = DistroData::from_file(Distro::Debian, "/usr/share/distro-info/debian.csv").unwrap();
//! assert!(data.table().contains("sid"));
//!
//! // Look for `ubuntu.csv` in a data directory
//! let data = DistroData::from_dir(Distro::Ubuntu, "/usr/share/distro-info").unwrap();
//!
//! // Use the builder for a fallback chain
//! let data = DistroData::builder(Distro::Ubuntu)
//!     .from_dir("/opt/distro-info")
//!     .from_dir("/usr/share/distro-info")
//!     .build()
//!     .unwrap();
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use distro_info_core::ReleaseTable;

use crate::csv::{Distro, parse_csv};
use crate::error::{DatabaseError, Result};

/// Describes where a [`DistroData`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A single dataset file.
    File(PathBuf),
    /// A data directory holding `<distro>.csv`.
    Directory(PathBuf),
    /// In-memory content.
    Inline,
    /// A fallback chain; the first source with a dataset was used.
    Multiple(Vec<DataSource>),
}

/// A distribution's parsed release table.
#[derive(Debug, Clone)]
pub struct DistroData {
    distro: Distro,
    table: ReleaseTable,
    source: DataSource,
}

impl DistroData {
    /// Returns a new [`DataBuilder`] for configuring a fallback chain.
    pub fn builder(distro: Distro) -> DataBuilder {
        DataBuilder::new(distro)
    }

    /// Loads a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the file cannot be read, or
    /// [`DatabaseError::Data`] if its content is malformed.
    pub fn from_file(distro: Distro, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let table = parse_csv(distro, &content).map_err(|source| DatabaseError::Data {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(%distro, path = %path.display(), records = table.len(), "loaded release data");

        Ok(Self {
            distro,
            table,
            source: DataSource::File(path.to_path_buf()),
        })
    }

    /// Loads `<distro>.csv` from a data directory.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file).
    pub fn from_dir(distro: Distro, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut data = Self::from_file(distro, dir.join(distro.file_name()))?;
        data.source = DataSource::Directory(dir.to_path_buf());
        Ok(data)
    }

    /// Parses in-memory dataset content.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Data`] if the content is malformed.
    pub fn parse(distro: Distro, content: &str) -> Result<Self> {
        let table = parse_csv(distro, content).map_err(|source| DatabaseError::Data {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Ok(Self {
            distro,
            table,
            source: DataSource::Inline,
        })
    }

    pub fn distro(&self) -> Distro {
        self.distro
    }

    pub fn table(&self) -> &ReleaseTable {
        &self.table
    }

    /// Consumes the data, returning the release table.
    pub fn into_table(self) -> ReleaseTable {
        self.table
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

/// Builder for loading [`DistroData`] with a fallback chain.
///
/// Sources are tried in the order they are added. A source whose dataset file
/// does not exist is skipped; any other failure, including malformed content,
/// stops the chain. If no source has a dataset,
/// [`DatabaseError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use distro_info_db::{Distro, DistroData};
///
/// let data = DistroData::builder(Distro::Debian)
///     .from_dir("/opt/distro-info")
///     .from_file("/usr/share/distro-info/debian.csv")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DataBuilder {
    distro: Distro,
    sources: Vec<DataSource>,
}

impl DataBuilder {
    /// Creates a new builder with no sources.
    pub fn new(distro: Distro) -> Self {
        Self {
            distro,
            sources: Vec::new(),
        }
    }

    /// Adds a data directory as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DataSource::Directory(path.into()));
        self
    }

    /// Adds a dataset file as a source.
    pub fn from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DataSource::File(path.into()));
        self
    }

    /// Loads from the first source that has a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NoSourcesAvailable`] when every source is
    /// missing, or the first non-missing failure.
    pub fn build(self) -> Result<DistroData> {
        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                DataSource::File(path) => DistroData::from_file(self.distro, path),
                DataSource::Directory(path) => DistroData::from_dir(self.distro, path),
                DataSource::Inline | DataSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut data) => {
                    data.source = DataSource::Multiple(all_sources);
                    return Ok(data);
                }
                Err(DatabaseError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                    tracing::debug!(?source, "release data not found, trying next source");
                }
                Err(err) => return Err(err),
            }
        }

        Err(DatabaseError::NoSourcesAvailable)
    }
}
