//! The query capability shared by every distribution.

use chrono::NaiveDate;

use crate::error::OutdatedDataError;
use crate::{ReleaseRecord, ReleaseTable, rules};

/// Point-in-time queries over one distribution's release table.
///
/// Every date parameter is optional; `None` resolves to [`today`](Self::today)
/// at the moment of the call. Implementors supply the table, the clock and
/// the distribution's notion of "supported"; everything else has a default
/// built from [`rules`](crate::rules).
pub trait DistroInfo {
    /// The release table queried.
    fn table(&self) -> &ReleaseTable;

    /// The date used when a query is given no explicit date.
    fn today(&self) -> NaiveDate;

    /// Returns `date`, or today when `None`.
    fn resolve_date(&self, date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or_else(|| self.today())
    }

    /// All known series, in table order.
    fn all(&self) -> Vec<&str> {
        self.table().series().collect()
    }

    /// Returns `true` if `codename` is a known series.
    fn valid(&self, codename: &str) -> bool {
        self.table().contains(codename)
    }

    /// Resolves a distribution alias to a series.
    ///
    /// The base behavior knows no aliases and returns `alias` unchanged.
    fn codename(
        &self,
        alias: &str,
        _date: Option<NaiveDate>,
        _default: Option<&str>,
    ) -> Result<Option<String>, OutdatedDataError> {
        Ok(Some(alias.to_string()))
    }

    /// Latest series in development on `date`.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] when the table does not cover `date`.
    fn devel(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        rules::devel(self.table(), self.resolve_date(date))
    }

    /// Latest stable series on `date`.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] when the table does not cover `date`.
    fn stable(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        rules::stable(self.table(), self.resolve_date(date))
    }

    /// Series supported on `date`, in table order.
    fn supported(&self, date: Option<NaiveDate>) -> Vec<&ReleaseRecord>;

    /// Series available on `date` but not supported, in table order.
    fn unsupported(&self, date: Option<NaiveDate>) -> Vec<&ReleaseRecord> {
        let date = self.resolve_date(date);
        let supported = self.supported(Some(date));
        rules::unsupported(self.table(), date, &supported)
    }
}
