//! Ubuntu release policy.
//!
//! Ubuntu support may continue past a release's desktop end of life through
//! its server end of life, and LTS releases are marked in the version label.

use chrono::NaiveDate;

use crate::date::{Clock, SystemClock};
use crate::error::OutdatedDataError;
use crate::{DistroInfo, ReleaseRecord, ReleaseTable, rules};

/// Queries over the Ubuntu release table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use distro_info_core::{
///     DistroInfo, FixedClock, OutdatedDataError, ReleaseRecord, ReleaseTable, UbuntuDistroInfo,
/// };
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let table = ReleaseTable::new(vec![
///     ReleaseRecord::new("trusty", d(2013, 10, 17))
///         .with_version("14.04 LTS")
///         .with_release(d(2014, 4, 17))
///         .with_eol(d(2017, 4, 17))
///         .with_eol_server(d(2019, 4, 17)),
/// ])
/// .unwrap();
/// let ubuntu = UbuntuDistroInfo::with_clock(table, FixedClock(d(2018, 1, 1)));
///
/// // desktop support ended in 2017; only the server window is still open
/// assert_eq!(ubuntu.lts(None), Err(OutdatedDataError));
/// assert_eq!(ubuntu.lts(Some(d(2016, 1, 1))).unwrap().series, "trusty");
/// assert_eq!(ubuntu.supported(None).len(), 1);
/// assert!(ubuntu.supported(Some(d(2019, 5, 1))).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct UbuntuDistroInfo<C = SystemClock> {
    table: ReleaseTable,
    clock: C,
}

impl UbuntuDistroInfo {
    /// Creates an engine that resolves "today" from the system clock.
    pub fn new(table: ReleaseTable) -> Self {
        Self::with_clock(table, SystemClock)
    }
}

impl<C: Clock> UbuntuDistroInfo<C> {
    /// Creates an engine with an explicit clock.
    pub fn with_clock(table: ReleaseTable, clock: C) -> Self {
        Self { table, clock }
    }

    /// Latest LTS release that is released and within its end of life on
    /// `date`.
    ///
    /// The whole table is searched. A series without a release or end-of-life
    /// date never qualifies.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] when no LTS release qualifies.
    pub fn lts(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        let date = self.resolve_date(date);
        rules::last_match(self.table.records().iter().filter(|r| {
            r.is_lts()
                && r.release.is_some_and(|release| date >= release)
                && r.eol.is_some_and(|eol| date <= eol)
        }))
    }

    /// Returns `true` if `series` is a known LTS release. Unknown series are
    /// not LTS.
    pub fn is_lts(&self, series: &str) -> bool {
        self.table.get(series).is_some_and(ReleaseRecord::is_lts)
    }
}

impl<C: Clock> DistroInfo for UbuntuDistroInfo<C> {
    fn table(&self) -> &ReleaseTable {
        &self.table
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Every available series within its end of life or its server end of
    /// life. An unset date counts as already passed here, so a series with
    /// neither date is never supported.
    fn supported(&self, date: Option<NaiveDate>) -> Vec<&ReleaseRecord> {
        let date = self.resolve_date(date);
        self.table
            .available_on(date)
            .filter(|r| {
                r.eol.is_some_and(|eol| date <= eol)
                    || r.eol_server.is_some_and(|eol_server| date <= eol_server)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(records: Vec<&ReleaseRecord>) -> Vec<&str> {
        records.into_iter().map(|r| r.series.as_str()).collect()
    }

    fn ubuntu() -> UbuntuDistroInfo<FixedClock> {
        let table = ReleaseTable::new(vec![
            ReleaseRecord::new("precise", ymd(2011, 10, 13))
                .with_version("12.04 LTS")
                .with_codename("Precise Pangolin")
                .with_release(ymd(2012, 4, 26))
                .with_eol(ymd(2017, 4, 28))
                .with_eol_server(ymd(2019, 4, 26)),
            ReleaseRecord::new("quantal", ymd(2012, 4, 26))
                .with_version("12.10")
                .with_release(ymd(2012, 10, 18))
                .with_eol(ymd(2014, 5, 16)),
            ReleaseRecord::new("trusty", ymd(2013, 10, 17))
                .with_version("14.04 LTS")
                .with_release(ymd(2014, 4, 17))
                .with_eol(ymd(2017, 4, 17))
                .with_eol_server(ymd(2019, 4, 17)),
            ReleaseRecord::new("utopic", ymd(2014, 4, 17)).with_version("14.10"),
        ])
        .unwrap();
        UbuntuDistroInfo::with_clock(table, FixedClock(ymd(2014, 6, 1)))
    }

    #[test]
    fn test_lts() {
        let ubuntu = ubuntu();
        assert_eq!(ubuntu.lts(None).unwrap().series, "trusty");
        assert_eq!(ubuntu.lts(Some(ymd(2013, 1, 1))).unwrap().series, "precise");
        assert_eq!(ubuntu.lts(Some(ymd(2018, 1, 1))), Err(OutdatedDataError));
        assert_eq!(ubuntu.lts(Some(ymd(2011, 1, 1))), Err(OutdatedDataError));
    }

    #[test]
    fn test_is_lts() {
        let ubuntu = ubuntu();
        assert!(ubuntu.is_lts("trusty"));
        assert!(!ubuntu.is_lts("quantal"));
        assert!(!ubuntu.is_lts("warty"));
    }

    #[test]
    fn test_devel_and_stable() {
        let ubuntu = ubuntu();
        assert_eq!(ubuntu.devel(None).unwrap().series, "utopic");
        assert_eq!(ubuntu.stable(None).unwrap().series, "trusty");
        assert_eq!(ubuntu.devel(Some(ymd(2013, 1, 1))), Err(OutdatedDataError));
    }

    #[test]
    fn test_supported_via_server_eol() {
        let ubuntu = ubuntu();
        let date = Some(ymd(2018, 1, 1));
        assert_eq!(series(ubuntu.supported(date)), ["precise", "trusty"]);
        assert_eq!(series(ubuntu.unsupported(date)), ["quantal", "utopic"]);
    }

    #[test]
    fn test_supported_excludes_unset_eol() {
        let ubuntu = ubuntu();
        // utopic has neither eol nor eol-server
        assert_eq!(
            series(ubuntu.supported(Some(ymd(2014, 5, 1)))),
            ["precise", "quantal", "trusty"]
        );
    }

    #[test]
    fn test_valid_has_no_aliases() {
        let ubuntu = ubuntu();
        assert!(ubuntu.valid("trusty"));
        assert!(!ubuntu.valid("stable"));
        assert_eq!(
            ubuntu.codename("stable", None, None).unwrap().as_deref(),
            Some("stable")
        );
    }
}
