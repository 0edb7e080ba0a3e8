//! Release dataset parsing.
//!
//! Datasets are plain comma-separated files with a header row. Columns are
//! matched by name, so their order does not matter:
//!
//! ```text
//! version,codename,series,created,release,eol,eol-server
//! 14.04 LTS,Trusty Tahr,trusty,2013-10-17,2014-04-17,2019-04,2024-04
//! ```
//!
//! Fields are never quoted. Blank lines and lines starting with `#` are
//! ignored; an empty field is an unset value.

use std::collections::HashMap;
use std::fmt;

use distro_info_core::{DataError, ReleaseRecord, ReleaseTable, parse_date, parse_optional_date};

/// A distribution with a known dataset layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distro {
    Debian,
    Ubuntu,
}

impl Distro {
    /// Dataset file name inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Distro::Debian => "debian.csv",
            Distro::Ubuntu => "ubuntu.csv",
        }
    }

    /// Name used in full release names, e.g. `Ubuntu 14.04 LTS "Trusty Tahr"`.
    pub fn display_name(self) -> &'static str {
        match self {
            Distro::Debian => "Debian",
            Distro::Ubuntu => "Ubuntu",
        }
    }

    /// Columns a dataset must carry.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Distro::Debian => &["series", "created", "release", "eol"],
            Distro::Ubuntu => &["version", "series", "created", "release", "eol", "eol-server"],
        }
    }

    fn has_server_eol(self) -> bool {
        matches!(self, Distro::Ubuntu)
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Distro::Debian => "debian",
            Distro::Ubuntu => "ubuntu",
        })
    }
}

/// Column positions resolved from the header row.
struct Columns {
    index: HashMap<String, usize>,
    width: usize,
}

impl Columns {
    fn from_header(distro: Distro, header: &str) -> Result<Self, DataError> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();

        if let Some(missing) = distro
            .required_columns()
            .iter()
            .find(|column| !index.contains_key(**column))
        {
            return Err(DataError::MissingColumn(missing.to_string()));
        }

        Ok(Self {
            index,
            width: names.len(),
        })
    }

    fn field<'a>(&self, fields: &[&'a str], name: &str) -> Option<&'a str> {
        self.index.get(name).map(|&i| fields[i])
    }
}

/// Parses a dataset into a [`ReleaseTable`].
///
/// The `eol-server` column is only read for distributions that define it.
///
/// # Errors
///
/// [`DataError::MissingHeader`] for input without a header row,
/// [`DataError::MissingColumn`] when a required column is absent, and any
/// per-row failure wrapped in [`DataError::Line`] with its 1-based line
/// number.
///
/// # Examples
///
/// ```
/// use distro_info_db::{Distro, parse_csv};
///
/// let csv = "version,codename,series,created,release,eol\n\
///            1.1,Buzz,buzz,1993-08-16,1996-06-17,1997-06-05\n\
///            ,Sid,sid,1993-08-16,,\n";
/// let table = parse_csv(Distro::Debian, csv).unwrap();
/// assert_eq!(table.series().collect::<Vec<_>>(), ["buzz", "sid"]);
/// assert_eq!(table.get("sid").unwrap().release, None);
/// ```
pub fn parse_csv(distro: Distro, content: &str) -> Result<ReleaseTable, DataError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(DataError::MissingHeader)?;
    let columns =
        Columns::from_header(distro, header).map_err(|err| err.at_line(header_line))?;

    let mut records = Vec::new();
    let mut record_lines = Vec::new();
    for (line, row) in lines {
        records.push(parse_row(distro, &columns, row).map_err(|err| err.at_line(line))?);
        record_lines.push(line);
    }

    ReleaseTable::new(records).map_err(|err| {
        if let DataError::DuplicateSeries { index, .. } = err {
            let line = record_lines.get(index).copied().unwrap_or_default();
            tracing::debug!(%err, line, "rejecting dataset");
            return err.at_line(line);
        }
        err
    })
}

fn parse_row(distro: Distro, columns: &Columns, row: &str) -> Result<ReleaseRecord, DataError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() != columns.width {
        return Err(DataError::FieldCount {
            expected: columns.width,
            found: fields.len(),
        });
    }

    let text = |name: &str| columns.field(&fields, name).unwrap_or_default();
    let date = |name: &str| parse_optional_date(text(name));

    let series = text("series");
    if series.is_empty() {
        return Err(DataError::EmptySeries);
    }

    let mut record = ReleaseRecord::new(series, parse_date(text("created"))?)
        .with_version(text("version"));
    if let Some(codename) = columns.field(&fields, "codename").filter(|c| !c.is_empty()) {
        record = record.with_codename(codename);
    }
    record.release = date("release")?;
    record.eol = date("eol")?;
    if distro.has_server_eol() {
        record.eol_server = date("eol-server")?;
    }
    Ok(record)
}
