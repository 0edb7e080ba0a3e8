//! Release dataset loading for distro-info.
//!
//! This crate turns the CSV datasets shipped in `/usr/share/distro-info`
//! into [`ReleaseTable`](distro_info_core::ReleaseTable)s and manages where
//! those datasets are looked up.
//!
//! # Quick start
//!
//! ```no_run
//! use distro_info_core::{DebianDistroInfo, DistroInfo};
//! use distro_info_db::{DataConfig, Distro, DistroData};
//!
//! // Load a dataset from the default data directory
//! let data = DistroData::from_dir(Distro::Debian, "/usr/share/distro-info").unwrap();
//! let debian = DebianDistroInfo::new(data.into_table());
//! println!("stable: {}", debian.stable(None).unwrap().series);
//!
//! // Search several directories from a YAML configuration
//! let config = DataConfig::load("distro-info.yml").unwrap();
//! let data = config.builder(Distro::Ubuntu).build().unwrap();
//! ```

mod config;
mod csv;
mod error;
mod loader;

pub use config::{DEFAULT_DATA_DIR, DataConfig};
pub use csv::{Distro, parse_csv};
pub use error::{DatabaseError, Result};
pub use loader::{DataBuilder, DataSource, DistroData};
