//! The immutable, ordered release table.
//!
//! Record order is the order the dataset lists them in and is never changed.
//! "Latest" selections pick the last qualifying record in that order, so the
//! table deliberately does not sort by any date.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::ReleaseRecord;
use crate::error::DataError;

/// Ordered, read-only sequence of [`ReleaseRecord`]s.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use distro_info_core::{ReleaseRecord, ReleaseTable};
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let table = ReleaseTable::new(vec![
///     ReleaseRecord::new("buzz", d(1993, 8, 16)),
///     ReleaseRecord::new("rex", d(1995, 3, 1)),
/// ])
/// .unwrap();
///
/// let available: Vec<_> = table.available_on(d(1994, 1, 1)).map(|r| r.series.as_str()).collect();
/// assert_eq!(available, ["buzz"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTable {
    records: Vec<ReleaseRecord>,
}

impl ReleaseTable {
    /// Builds a table from records in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Empty`] for an empty list,
    /// [`DataError::EmptySeries`] for a blank series, and
    /// [`DataError::DuplicateSeries`] with the position of the repeat when a
    /// series appears twice.
    pub fn new(records: Vec<ReleaseRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            let series = record.series.as_str();
            if series.trim().is_empty() {
                return Err(DataError::EmptySeries);
            }
            if !seen.insert(series) {
                return Err(DataError::DuplicateSeries {
                    series: series.to_string(),
                    index,
                });
            }
        }

        Ok(Self { records })
    }

    /// All records, in table order.
    pub fn records(&self) -> &[ReleaseRecord] {
        &self.records
    }

    /// All series identifiers, in table order.
    pub fn series(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.series.as_str())
    }

    /// Records whose entry was created on or before `date`, in table order.
    pub fn available_on(&self, date: NaiveDate) -> impl Iterator<Item = &ReleaseRecord> {
        self.records.iter().filter(move |r| r.is_available_on(date))
    }

    /// Looks up a record by series.
    pub fn get(&self, series: &str) -> Option<&ReleaseRecord> {
        self.records.iter().find(|r| r.series == series)
    }

    /// Returns `true` if `series` names a record in this table.
    pub fn contains(&self, series: &str) -> bool {
        self.get(series).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(ReleaseTable::new(Vec::new()), Err(DataError::Empty));
    }

    #[test]
    fn test_rejects_duplicate_series() {
        let result = ReleaseTable::new(vec![
            ReleaseRecord::new("woody", ymd(2000, 8, 15)),
            ReleaseRecord::new("sarge", ymd(2000, 9, 1)),
            ReleaseRecord::new("woody", ymd(2001, 1, 1)),
        ]);
        assert_eq!(
            result,
            Err(DataError::DuplicateSeries {
                series: "woody".into(),
                index: 2
            })
        );
    }

    #[test]
    fn test_rejects_blank_series() {
        let result = ReleaseTable::new(vec![ReleaseRecord::new(" ", ymd(2000, 8, 15))]);
        assert_eq!(result, Err(DataError::EmptySeries));
    }

    #[test]
    fn test_keeps_given_order() {
        // sid is listed last even though it was created first.
        let table = ReleaseTable::new(vec![
            ReleaseRecord::new("buzz", ymd(1993, 8, 16)),
            ReleaseRecord::new("rex", ymd(1995, 3, 1)),
            ReleaseRecord::new("sid", ymd(1993, 8, 16)),
        ])
        .unwrap();
        assert_eq!(table.series().collect::<Vec<_>>(), ["buzz", "rex", "sid"]);

        let available: Vec<_> = table
            .available_on(ymd(1994, 1, 1))
            .map(|r| r.series.as_str())
            .collect();
        assert_eq!(available, ["buzz", "sid"]);
    }

    #[test]
    fn test_available_on_is_inclusive() {
        let table = ReleaseTable::new(vec![ReleaseRecord::new("rex", ymd(1995, 3, 1))]).unwrap();
        assert_eq!(table.available_on(ymd(1995, 2, 28)).count(), 0);
        assert_eq!(table.available_on(ymd(1995, 3, 1)).count(), 1);
    }

    #[test]
    fn test_lookup() {
        let table = ReleaseTable::new(vec![ReleaseRecord::new("rex", ymd(1995, 3, 1))]).unwrap();
        assert!(table.contains("rex"));
        assert!(!table.contains("bo"));
        assert_eq!(table.get("rex").map(|r| r.created), Some(ymd(1995, 3, 1)));
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
