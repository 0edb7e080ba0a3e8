//! Release record definitions.
//!
//! A [`ReleaseRecord`] is one row of a distribution's release table: the
//! series identifier plus the milestone dates that drive every query.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dated point in a release's lifecycle.
///
/// # Examples
///
/// ```
/// use distro_info_core::Milestone;
///
/// let m: Milestone = "eol-server".parse().unwrap();
/// assert_eq!(m, Milestone::EolServer);
/// assert_eq!(m.to_string(), "eol-server");
/// assert!("eol_server".parse::<Milestone>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Milestone {
    /// The series entry was opened.
    Created,
    /// The series became the current stable release.
    Release,
    /// General support ended.
    Eol,
    /// Extended (server) support ended. Ubuntu only.
    EolServer,
}

impl Milestone {
    /// Every milestone, in lifecycle order.
    pub const ALL: [Milestone; 4] = [
        Milestone::Created,
        Milestone::Release,
        Milestone::Eol,
        Milestone::EolServer,
    ];

    /// Column name used for this milestone in datasets and on the command
    /// line.
    pub fn as_str(self) -> &'static str {
        match self {
            Milestone::Created => "created",
            Milestone::Release => "release",
            Milestone::Eol => "eol",
            Milestone::EolServer => "eol-server",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A milestone name that is not one of `created`, `release`, `eol`,
/// `eol-server`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid milestone: {0}")]
pub struct InvalidMilestone(pub String);

impl FromStr for Milestone {
    type Err = InvalidMilestone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Milestone::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InvalidMilestone(s.to_string()))
    }
}

/// One distribution series and its lifecycle dates.
///
/// Only `series` and `created` are mandatory. An unset `release` marks a
/// series that has not been released yet; an unset `eol` means support has
/// no known end.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use distro_info_core::{Milestone, ReleaseRecord};
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let trusty = ReleaseRecord::new("trusty", d(2013, 10, 17))
///     .with_version("14.04 LTS")
///     .with_codename("Trusty Tahr")
///     .with_release(d(2014, 4, 17))
///     .with_eol(d(2019, 4, 25));
///
/// assert!(trusty.is_lts());
/// assert_eq!(trusty.days_until(Milestone::Release, d(2014, 4, 10)), Some(7));
/// assert_eq!(trusty.days_until(Milestone::EolServer, d(2014, 4, 10)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Display version, e.g. `14.04 LTS` or `7`. May be empty.
    pub version: String,
    /// Human-readable name, e.g. `Trusty Tahr`.
    pub codename: String,
    /// Unique series identifier, e.g. `trusty`.
    pub series: String,
    pub created: NaiveDate,
    pub release: Option<NaiveDate>,
    pub eol: Option<NaiveDate>,
    #[serde(rename = "eol-server")]
    pub eol_server: Option<NaiveDate>,
}

impl ReleaseRecord {
    /// Creates a record with only the mandatory fields set.
    ///
    /// The codename starts out equal to the series.
    pub fn new(series: impl Into<String>, created: NaiveDate) -> Self {
        let series = series.into();
        Self {
            version: String::new(),
            codename: series.clone(),
            series,
            created,
            release: None,
            eol: None,
            eol_server: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = codename.into();
        self
    }

    pub fn with_release(mut self, release: NaiveDate) -> Self {
        self.release = Some(release);
        self
    }

    pub fn with_eol(mut self, eol: NaiveDate) -> Self {
        self.eol = Some(eol);
        self
    }

    pub fn with_eol_server(mut self, eol_server: NaiveDate) -> Self {
        self.eol_server = Some(eol_server);
        self
    }

    /// Returns the date recorded for `milestone`, if any.
    pub fn milestone(&self, milestone: Milestone) -> Option<NaiveDate> {
        match milestone {
            Milestone::Created => Some(self.created),
            Milestone::Release => self.release,
            Milestone::Eol => self.eol,
            Milestone::EolServer => self.eol_server,
        }
    }

    /// Signed number of days from `date` to `milestone`.
    ///
    /// Negative once the milestone has passed; `None` if it is not set.
    pub fn days_until(&self, milestone: Milestone, date: NaiveDate) -> Option<i64> {
        self.milestone(milestone)
            .map(|target| target.signed_duration_since(date).num_days())
    }

    /// Returns `true` if the version label marks a long-term-support release.
    pub fn is_lts(&self) -> bool {
        self.version.contains("LTS")
    }

    /// Returns `true` if the series entry existed on `date`.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.created <= date
    }
}
