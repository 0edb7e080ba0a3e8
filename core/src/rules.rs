//! Distribution-independent selection rules.
//!
//! These are the predicates and selectors the [`DistroInfo`](crate::DistroInfo)
//! defaults are built from. The Debian and Ubuntu engines reuse them where
//! their own policy does not differ.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::OutdatedDataError;
use crate::{ReleaseRecord, ReleaseTable};

/// `date` is on or before the record's end of life, or no end is known.
pub fn within_eol(record: &ReleaseRecord, date: NaiveDate) -> bool {
    record.eol.is_none_or(|eol| date <= eol)
}

/// The record is unreleased, or still before its release and not past its
/// end of life.
pub fn is_devel(record: &ReleaseRecord, date: NaiveDate) -> bool {
    match record.release {
        None => true,
        Some(release) => date < release && within_eol(record, date),
    }
}

/// The record has been released and is not past its end of life.
pub fn is_stable(record: &ReleaseRecord, date: NaiveDate) -> bool {
    record.release.is_some_and(|release| date >= release) && within_eol(record, date)
}

/// Last record of `matches`, in table order.
///
/// # Errors
///
/// [`OutdatedDataError`] when nothing matched.
pub fn last_match<'a>(
    matches: impl IntoIterator<Item = &'a ReleaseRecord>,
) -> Result<&'a ReleaseRecord, OutdatedDataError> {
    matches.into_iter().last().ok_or(OutdatedDataError)
}

/// Second-to-last record of `matches`, in table order.
///
/// # Errors
///
/// [`OutdatedDataError`] when fewer than two records matched.
pub fn second_to_last_match<'a>(
    matches: impl IntoIterator<Item = &'a ReleaseRecord>,
) -> Result<&'a ReleaseRecord, OutdatedDataError> {
    let matches: Vec<&ReleaseRecord> = matches.into_iter().collect();
    match matches.len() {
        0 | 1 => Err(OutdatedDataError),
        n => Ok(matches[n - 2]),
    }
}

/// Available records in development on `date`.
pub fn devel_candidates(
    table: &ReleaseTable,
    date: NaiveDate,
) -> impl Iterator<Item = &ReleaseRecord> {
    table.available_on(date).filter(move |r| is_devel(r, date))
}

/// Latest available record in development on `date`.
///
/// # Errors
///
/// [`OutdatedDataError`] when no record qualifies.
pub fn devel(table: &ReleaseTable, date: NaiveDate) -> Result<&ReleaseRecord, OutdatedDataError> {
    last_match(devel_candidates(table, date))
}

/// Latest available stable record on `date`.
///
/// # Errors
///
/// [`OutdatedDataError`] when no record qualifies.
pub fn stable(table: &ReleaseTable, date: NaiveDate) -> Result<&ReleaseRecord, OutdatedDataError> {
    last_match(table.available_on(date).filter(|r| is_stable(r, date)))
}

/// Available records on `date` that are not in `supported`, compared by
/// series.
pub fn unsupported<'a>(
    table: &'a ReleaseTable,
    date: NaiveDate,
    supported: &[&ReleaseRecord],
) -> Vec<&'a ReleaseRecord> {
    let supported: HashSet<&str> = supported.iter().map(|r| r.series.as_str()).collect();
    table
        .available_on(date)
        .filter(|r| !supported.contains(r.series.as_str()))
        .collect()
}
