//! Point-in-time queries over Debian and Ubuntu release tables.
//!
//! This crate answers questions such as "which release is in development on
//! date D" or "which releases are supported on date D" from an ordered table
//! of release records:
//!
//! - [`ReleaseRecord`] — one series and its milestone dates.
//! - [`ReleaseTable`] — the immutable, ordered sequence of records.
//! - [`DistroInfo`] — the query capability shared by all distributions, with
//!   the two policies [`DebianDistroInfo`] and [`UbuntuDistroInfo`].
//!
//! Queries take an optional date. When it is omitted the engine asks its
//! [`Clock`] at call time; tests inject a [`FixedClock`].
//!
//! A query that finds nothing for its date returns [`OutdatedDataError`],
//! meaning the dataset does not reach that far. Malformed input is rejected
//! with [`DataError`] while the table is built.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use distro_info_core::*;
//!
//! let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! let table = ReleaseTable::new(vec![
//!     ReleaseRecord::new("buzz", d(1993, 8, 16)).with_release(d(1996, 6, 17)).with_eol(d(1997, 6, 5)),
//!     ReleaseRecord::new("rex", d(1995, 3, 1)).with_release(d(1996, 12, 12)).with_eol(d(1998, 4, 5)),
//!     ReleaseRecord::new("sid", d(1993, 8, 16)),
//! ])
//! .unwrap();
//!
//! let debian = DebianDistroInfo::new(table);
//! let date = Some(d(1996, 7, 1));
//! assert_eq!(debian.stable(date).unwrap().series, "buzz");
//! assert_eq!(debian.devel(date).unwrap().series, "rex");
//! assert!(debian.devel(Some(d(2030, 1, 1))).is_err());
//! ```

mod date;
mod debian;
mod error;
mod query;
pub mod rules;
mod table;
mod types;
mod ubuntu;

pub use date::{Clock, FixedClock, SystemClock, parse_date, parse_optional_date};
pub use debian::{DEBIAN_ALIASES, DebianDistroInfo};
pub use error::{DataError, OutdatedDataError};
pub use query::DistroInfo;
pub use table::ReleaseTable;
pub use types::{InvalidMilestone, Milestone, ReleaseRecord};
pub use ubuntu::UbuntuDistroInfo;
