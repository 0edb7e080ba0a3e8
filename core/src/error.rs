//! Error taxonomy for release tables and queries.
//!
//! [`DataError`] is raised while a dataset is turned into a
//! [`ReleaseTable`](crate::ReleaseTable) and is fatal to that construction.
//! [`OutdatedDataError`] is the normal "no record covers this date" outcome of
//! a selection query and is meant to be handled by the caller.

use thiserror::Error;

/// Malformed or unusable release data.
///
/// Returned only while building a table; queries never produce it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A date is neither `YYYY-MM-DD` nor `YYYY-MM`, or names a day that
    /// does not exist.
    #[error("invalid date `{value}`")]
    InvalidDate { value: String },
    /// The dataset contains no records at all.
    #[error("no release records found")]
    Empty,
    /// The dataset has no header row.
    #[error("missing header row")]
    MissingHeader,
    /// A required column is absent from the header.
    #[error("missing required column `{0}`")]
    MissingColumn(String),
    /// A row has a different number of fields than the header.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    /// A record has an empty series identifier.
    #[error("empty series identifier")]
    EmptySeries,
    /// Two records share the same series identifier. `index` is the
    /// 0-based position of the later record.
    #[error("duplicate series `{series}`")]
    DuplicateSeries { series: String, index: usize },
    /// A failure attributed to a specific input line (1-based).
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DataError>,
    },
}

impl DataError {
    /// Attaches a 1-based line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        Self::Line {
            line,
            source: Box::new(self),
        }
    }
}

/// The table has no record qualifying for the requested date.
///
/// This usually means the dataset predates the query date and should be
/// refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Distribution data outdated.")]
pub struct OutdatedDataError;
