//! Debian release policy.
//!
//! Debian keeps a permanently unreleased entry (`sid`, and later
//! `experimental`) at the end of its table, so "devel" is the second-to-last
//! development candidate rather than the last. It also names its releases by
//! role: `unstable`, `testing`, `stable` and `oldstable`.

use chrono::NaiveDate;

use crate::date::{Clock, SystemClock};
use crate::error::OutdatedDataError;
use crate::{DistroInfo, ReleaseRecord, ReleaseTable, rules};

/// Role aliases accepted by [`DebianDistroInfo::codename`].
pub const DEBIAN_ALIASES: [&str; 4] = ["unstable", "testing", "stable", "oldstable"];

/// Queries over the Debian release table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use distro_info_core::{DebianDistroInfo, DistroInfo, FixedClock, ReleaseRecord, ReleaseTable};
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let table = ReleaseTable::new(vec![
///     ReleaseRecord::new("buzz", d(1993, 8, 16)).with_release(d(1996, 6, 17)).with_eol(d(1997, 6, 5)),
///     ReleaseRecord::new("rex", d(1995, 3, 1)).with_release(d(1996, 12, 12)).with_eol(d(1998, 4, 5)),
///     ReleaseRecord::new("sid", d(1993, 8, 16)),
/// ])
/// .unwrap();
/// let debian = DebianDistroInfo::with_clock(table, FixedClock(d(1996, 7, 1)));
///
/// assert_eq!(debian.stable(None).unwrap().series, "buzz");
/// assert_eq!(debian.devel(None).unwrap().series, "rex");
/// assert_eq!(debian.codename("stable", None, None).unwrap().as_deref(), Some("buzz"));
/// ```
#[derive(Debug, Clone)]
pub struct DebianDistroInfo<C = SystemClock> {
    table: ReleaseTable,
    clock: C,
}

impl DebianDistroInfo {
    /// Creates an engine that resolves "today" from the system clock.
    pub fn new(table: ReleaseTable) -> Self {
        Self::with_clock(table, SystemClock)
    }
}

impl<C: Clock> DebianDistroInfo<C> {
    /// Creates an engine with an explicit clock.
    pub fn with_clock(table: ReleaseTable, clock: C) -> Self {
        Self { table, clock }
    }

    /// The stable release before the current one.
    ///
    /// Unlike [`stable`](DistroInfo::stable), end of life is not considered.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] unless at least two series have been released
    /// by `date`.
    pub fn old(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        let date = self.resolve_date(date);
        rules::second_to_last_match(
            self.table
                .available_on(date)
                .filter(|r| r.release.is_some_and(|release| date >= release)),
        )
    }

    /// The current testing release.
    ///
    /// An unreleased series qualifies only once it has a version number;
    /// that keeps `sid` and `experimental` out.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] when no series qualifies on `date`.
    pub fn testing(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        let date = self.resolve_date(date);
        rules::last_match(self.table.available_on(date).filter(|r| match r.release {
            None => !r.version.is_empty(),
            Some(release) => date < release && rules::within_eol(r, date),
        }))
    }

    /// Names the role `codename` currently fills.
    ///
    /// Returns `stable`, `testing` or `unstable` when `codename` is the series
    /// in that role on `date`, and `codename` itself otherwise.
    ///
    /// # Errors
    ///
    /// [`OutdatedDataError`] if any of the three roles cannot be resolved.
    pub fn alias(
        &self,
        codename: &str,
        date: Option<NaiveDate>,
    ) -> Result<String, OutdatedDataError> {
        let date = Some(self.resolve_date(date));
        let stable = self.stable(date)?;
        let testing = self.testing(date)?;
        let unstable = self.devel(date)?;

        let alias = if stable.series == codename {
            "stable"
        } else if testing.series == codename {
            "testing"
        } else if unstable.series == codename {
            "unstable"
        } else {
            codename
        };
        Ok(alias.to_string())
    }
}

impl<C: Clock> DistroInfo for DebianDistroInfo<C> {
    fn table(&self) -> &ReleaseTable {
        &self.table
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn valid(&self, codename: &str) -> bool {
        self.table.contains(codename) || DEBIAN_ALIASES.contains(&codename)
    }

    /// Maps `unstable`, `testing`, `stable` and `oldstable` to series.
    ///
    /// Any other input yields `default`.
    fn codename(
        &self,
        alias: &str,
        date: Option<NaiveDate>,
        default: Option<&str>,
    ) -> Result<Option<String>, OutdatedDataError> {
        let record = match alias {
            "unstable" => self.devel(date)?,
            "testing" => self.testing(date)?,
            "stable" => self.stable(date)?,
            "oldstable" => self.old(date)?,
            _ => return Ok(default.map(str::to_string)),
        };
        Ok(Some(record.series.clone()))
    }

    fn devel(&self, date: Option<NaiveDate>) -> Result<&ReleaseRecord, OutdatedDataError> {
        let date = self.resolve_date(date);
        rules::second_to_last_match(rules::devel_candidates(&self.table, date))
    }

    /// Every available series that has not reached its end of life. A
    /// series without an end-of-life date is supported.
    fn supported(&self, date: Option<NaiveDate>) -> Vec<&ReleaseRecord> {
        let date = self.resolve_date(date);
        self.table
            .available_on(date)
            .filter(|r| rules::within_eol(r, date))
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

    fn early_debian() -> DebianDistroInfo<FixedClock> {
        let table = ReleaseTable::new(vec![
            ReleaseRecord::new("buzz", ymd(1993, 8, 16))
                .with_version("1.1")
                .with_release(ymd(1996, 6, 17))
                .with_eol(ymd(1997, 6, 5)),
            ReleaseRecord::new("rex", ymd(1995, 3, 1))
                .with_version("1.2")
                .with_release(ymd(1996, 12, 12))
                .with_eol(ymd(1998, 4, 5)),
            ReleaseRecord::new("bo", ymd(1996, 6, 17))
                .with_version("1.3")
                .with_release(ymd(1997, 6, 5))
                .with_eol(ymd(1999, 3, 9)),
            ReleaseRecord::new("sid", ymd(1993, 8, 16)),
        ])
        .unwrap();
        DebianDistroInfo::with_clock(table, FixedClock(ymd(1996, 7, 1)))
    }

    #[test]
    fn test_stable_and_devel_scenario() {
        let debian = early_debian();
        let date = Some(ymd(1996, 7, 1));
        assert_eq!(debian.stable(date).unwrap().series, "buzz");
        // bo is the newest numbered release in development, sid is reserved
        assert_eq!(debian.devel(date).unwrap().series, "bo");
    }

    #[test]
    fn test_devel_needs_two_candidates() {
        let table = ReleaseTable::new(vec![
            ReleaseRecord::new("buzz", ymd(1993, 8, 16))
                .with_release(ymd(1996, 6, 17))
                .with_eol(ymd(1997, 6, 5)),
            ReleaseRecord::new("sid", ymd(1993, 8, 16)),
        ])
        .unwrap();
        let debian = DebianDistroInfo::with_clock(table, FixedClock(ymd(1996, 7, 1)));
        assert_eq!(debian.devel(None), Err(OutdatedDataError));
    }

    #[test]
    fn test_none_date_uses_clock() {
        let debian = early_debian();
        assert_eq!(debian.stable(None), debian.stable(Some(ymd(1996, 7, 1))));
    }

    #[test]
    fn test_old_ignores_eol() {
        let debian = early_debian();
        // buzz is past its eol but still the previous stable
        assert_eq!(debian.old(Some(ymd(1997, 7, 1))).unwrap().series, "rex");
        assert_eq!(debian.old(Some(ymd(1997, 1, 1))).unwrap().series, "buzz");
        assert_eq!(debian.old(Some(ymd(1996, 7, 1))), Err(OutdatedDataError));
    }

    #[test]
    fn test_testing() {
        let debian = early_debian();
        assert_eq!(debian.testing(Some(ymd(1996, 7, 1))).unwrap().series, "bo");
        // past bo's release nothing numbered is pending and sid has no version
        assert_eq!(debian.testing(Some(ymd(1997, 7, 1))), Err(OutdatedDataError));
    }

    #[test]
    fn test_testing_accepts_numbered_unreleased() {
        let table = ReleaseTable::new(vec![
            ReleaseRecord::new("hamm", ymd(1997, 6, 5)).with_version("2.0"),
            ReleaseRecord::new("sid", ymd(1993, 8, 16)),
        ])
        .unwrap();
        let debian = DebianDistroInfo::with_clock(table, FixedClock(ymd(1998, 1, 1)));
        assert_eq!(debian.testing(None).unwrap().series, "hamm");
    }

    #[test]
    fn test_supported_and_unsupported() {
        let debian = early_debian();
        let date = Some(ymd(1997, 7, 1));
        assert_eq!(series(debian.supported(date)), ["rex", "bo", "sid"]);
        assert_eq!(series(debian.unsupported(date)), ["buzz"]);
    }

    #[test]
    fn test_codename_aliases() {
        let debian = early_debian();
        let date = Some(ymd(1997, 7, 1));
        let resolve = |alias| debian.codename(alias, date, None).unwrap();
        assert_eq!(resolve("stable").as_deref(), Some("bo"));
        assert_eq!(resolve("oldstable").as_deref(), Some("rex"));
        assert_eq!(resolve("bogus"), None);

        let earlier = Some(ymd(1996, 7, 1));
        assert_eq!(
            debian.codename("unstable", earlier, None).unwrap().as_deref(),
            Some("bo")
        );
        assert_eq!(
            debian.codename("testing", earlier, None).unwrap().as_deref(),
            Some("bo")
        );
        assert_eq!(
            debian.codename("bogus", date, Some("fallback")).unwrap().as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn test_codename_propagates_outdated() {
        let debian = early_debian();
        assert_eq!(
            debian.codename("oldstable", Some(ymd(1996, 7, 1)), None),
            Err(OutdatedDataError)
        );
    }

    #[test]
    fn test_valid() {
        let debian = early_debian();
        assert!(debian.valid("rex"));
        assert!(debian.valid("oldstable"));
        assert!(!debian.valid("hamm"));
    }

    #[test]
    fn test_alias() {
        let debian = early_debian();
        let date = Some(ymd(1996, 7, 1));
        assert_eq!(debian.alias("buzz", date).unwrap(), "stable");
        assert_eq!(debian.alias("bo", date).unwrap(), "testing");
        assert_eq!(debian.alias("rex", date).unwrap(), "rex");
        assert_eq!(debian.alias("sid", date).unwrap(), "sid");
    }
}
