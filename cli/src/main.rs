use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use distro_info_core::{
    DebianDistroInfo, DistroInfo, Milestone, OutdatedDataError, ReleaseRecord, ReleaseTable,
    UbuntuDistroInfo,
};
use distro_info_db::{DataConfig, Distro, DistroData};
use serde::Serialize;

mod logging;

const OUTDATED_HINT: &str = "Please check for an update for distro-info-data. \
     See /usr/share/doc/distro-info-data/README.Debian for details.";

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "distro-info")]
#[command(version, about = "Release information for Debian and Ubuntu")]
struct Cli {
    /// Directory holding debian.csv and ubuntu.csv (replaces configured directories).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// YAML file listing the data directories to search.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    distro: DistroCommand,
}

#[derive(Debug, Subcommand)]
enum DistroCommand {
    /// Query the Debian release table.
    Debian(DebianArgs),
    /// Query the Ubuntu release table.
    Ubuntu(UbuntuArgs),
}

#[derive(Debug, Args)]
struct DebianArgs {
    #[command(flatten)]
    select: DebianSelect,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct UbuntuArgs {
    #[command(flatten)]
    select: UbuntuSelect,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct DebianSelect {
    /// List all known versions.
    #[arg(short, long)]
    all: bool,
    /// Latest development version.
    #[arg(short, long)]
    devel: bool,
    /// Latest stable version.
    #[arg(short, long)]
    stable: bool,
    /// List of all supported versions.
    #[arg(long)]
    supported: bool,
    /// List of all unsupported versions.
    #[arg(long)]
    unsupported: bool,
    /// Current testing version.
    #[arg(short, long)]
    testing: bool,
    /// Latest oldstable version.
    #[arg(short, long)]
    oldstable: bool,
    /// Print the alias (stable, testing, unstable) of the given codename.
    #[arg(long, value_name = "DIST", value_parser = parse_codename)]
    alias: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct UbuntuSelect {
    /// List all known versions.
    #[arg(short, long)]
    all: bool,
    /// Latest development version.
    #[arg(short, long)]
    devel: bool,
    /// Latest stable version.
    #[arg(short, long)]
    stable: bool,
    /// List of all supported versions.
    #[arg(long)]
    supported: bool,
    /// List of all unsupported versions.
    #[arg(long)]
    unsupported: bool,
    /// Latest long term support (LTS) version.
    #[arg(long)]
    lts: bool,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Date for calculating the version (default: today).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_query_date)]
    date: Option<NaiveDate>,
    /// Additionally display days until MILESTONE (created, release, eol, eol-server).
    #[arg(
        short = 'y',
        long,
        value_name = "MILESTONE",
        num_args = 0..=1,
        default_missing_value = "release"
    )]
    days: Option<Milestone>,
    /// Print the codename (default).
    #[arg(short, long, conflicts_with_all = ["fullname", "release"])]
    codename: bool,
    /// Print the full name.
    #[arg(short, long, conflicts_with = "release")]
    fullname: bool,
    /// Print the release version.
    #[arg(short, long)]
    release: bool,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

/// Selections every distribution supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Query {
    All,
    Devel,
    Stable,
    Supported,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DebianQuery {
    Common(Query),
    Testing,
    OldStable,
    Alias(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UbuntuQuery {
    Common(Query),
    Lts,
}

impl From<DebianSelect> for DebianQuery {
    fn from(select: DebianSelect) -> Self {
        if let Some(codename) = select.alias {
            Self::Alias(codename)
        } else if select.all {
            Self::Common(Query::All)
        } else if select.devel {
            Self::Common(Query::Devel)
        } else if select.stable {
            Self::Common(Query::Stable)
        } else if select.supported {
            Self::Common(Query::Supported)
        } else if select.unsupported {
            Self::Common(Query::Unsupported)
        } else if select.testing {
            Self::Testing
        } else {
            Self::OldStable
        }
    }
}

impl From<UbuntuSelect> for UbuntuQuery {
    fn from(select: UbuntuSelect) -> Self {
        if select.all {
            Self::Common(Query::All)
        } else if select.devel {
            Self::Common(Query::Devel)
        } else if select.stable {
            Self::Common(Query::Stable)
        } else if select.supported {
            Self::Common(Query::Supported)
        } else if select.unsupported {
            Self::Common(Query::Unsupported)
        } else {
            Self::Lts
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Codename,
    Fullname,
    Release,
}

/// How query results are printed.
#[derive(Debug, Clone, Copy)]
struct OutputSettings {
    distro: Distro,
    style: Style,
    days: Option<Milestone>,
    format: CliOutputFormat,
}

impl OutputSettings {
    fn new(distro: Distro, args: &OutputArgs) -> Result<Self, String> {
        if distro == Distro::Debian && args.days == Some(Milestone::EolServer) {
            return Err(format!("invalid milestone: {}", Milestone::EolServer));
        }
        let style = if args.fullname {
            Style::Fullname
        } else if args.release {
            Style::Release
        } else {
            Style::Codename
        };
        Ok(Self {
            distro,
            style,
            days: args.days,
            format: args.format,
        })
    }
}

/// The outcome of a query: release records, or an alias name.
#[derive(Debug)]
enum Answer<'a> {
    Records(Vec<&'a ReleaseRecord>),
    Alias(String),
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a ReleaseRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<Option<i64>>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("distro-info: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref(), cli.data_dir)?;

    let rendered = match cli.distro {
        DistroCommand::Debian(args) => {
            let settings = OutputSettings::new(Distro::Debian, &args.output)?;
            let engine = DebianDistroInfo::new(load_table(&config, Distro::Debian)?);
            let date = engine.resolve_date(args.output.date);
            let query = DebianQuery::from(args.select);
            tracing::debug!(?query, %date, "running debian query");
            let answer = answer_debian(&engine, &query, date).map_err(outdated_message)?;
            render(&answer, &settings, date)?
        }
        DistroCommand::Ubuntu(args) => {
            let settings = OutputSettings::new(Distro::Ubuntu, &args.output)?;
            let engine = UbuntuDistroInfo::new(load_table(&config, Distro::Ubuntu)?);
            let date = engine.resolve_date(args.output.date);
            let query = UbuntuQuery::from(args.select);
            tracing::debug!(?query, %date, "running ubuntu query");
            let answer = answer_ubuntu(&engine, query, date).map_err(outdated_message)?;
            render(&answer, &settings, date)?
        }
    };

    print!("{rendered}");
    Ok(())
}

fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<DataConfig, String> {
    let mut config = match path {
        Some(path) => DataConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => DataConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dirs = vec![dir];
    }
    Ok(config)
}

fn load_table(config: &DataConfig, distro: Distro) -> Result<ReleaseTable, String> {
    config
        .builder(distro)
        .build()
        .map(DistroData::into_table)
        .map_err(|err| format!("Failed to load {} release data: {err}", distro.display_name()))
}

fn outdated_message(err: OutdatedDataError) -> String {
    format!("{err}\n{OUTDATED_HINT}")
}

fn answer_common<'a, D: DistroInfo>(
    engine: &'a D,
    query: Query,
    date: NaiveDate,
) -> Result<Vec<&'a ReleaseRecord>, OutdatedDataError> {
    let date = Some(date);
    match query {
        Query::All => Ok(engine.table().records().iter().collect()),
        Query::Devel => engine.devel(date).map(|r| vec![r]),
        Query::Stable => engine.stable(date).map(|r| vec![r]),
        Query::Supported => Ok(engine.supported(date)),
        Query::Unsupported => Ok(engine.unsupported(date)),
    }
}

fn answer_debian<'a>(
    engine: &'a DebianDistroInfo,
    query: &DebianQuery,
    date: NaiveDate,
) -> Result<Answer<'a>, OutdatedDataError> {
    match query {
        DebianQuery::Common(query) => answer_common(engine, *query, date).map(Answer::Records),
        DebianQuery::Testing => engine.testing(Some(date)).map(|r| Answer::Records(vec![r])),
        DebianQuery::OldStable => engine.old(Some(date)).map(|r| Answer::Records(vec![r])),
        DebianQuery::Alias(codename) => engine.alias(codename, Some(date)).map(Answer::Alias),
    }
}

fn answer_ubuntu<'a>(
    engine: &'a UbuntuDistroInfo,
    query: UbuntuQuery,
    date: NaiveDate,
) -> Result<Answer<'a>, OutdatedDataError> {
    match query {
        UbuntuQuery::Common(query) => answer_common(engine, query, date).map(Answer::Records),
        UbuntuQuery::Lts => engine.lts(Some(date)).map(|r| Answer::Records(vec![r])),
    }
}

fn render(answer: &Answer<'_>, settings: &OutputSettings, date: NaiveDate) -> Result<String, String> {
    match (answer, settings.format) {
        (Answer::Alias(alias), CliOutputFormat::Text) => Ok(format!("{alias}\n")),
        (Answer::Alias(alias), CliOutputFormat::Json) => {
            let raw = serde_json::to_string_pretty(&serde_json::json!({ "alias": alias }))
                .map_err(|err| err.to_string())?;
            Ok(format!("{raw}\n"))
        }
        (Answer::Records(records), CliOutputFormat::Text) => Ok(records
            .iter()
            .map(|record| format!("{}\n", text_line(record, settings, date)))
            .collect()),
        (Answer::Records(records), CliOutputFormat::Json) => {
            let rows: Vec<JsonRecord<'_>> = records
                .iter()
                .map(|record| JsonRecord {
                    record,
                    days: settings.days.map(|m| record.days_until(m, date)),
                })
                .collect();
            let raw = serde_json::to_string_pretty(&rows).map_err(|err| err.to_string())?;
            Ok(format!("{raw}\n"))
        }
    }
}

fn text_line(record: &ReleaseRecord, settings: &OutputSettings, date: NaiveDate) -> String {
    let mut line = match settings.style {
        Style::Codename => record.series.clone(),
        Style::Release if record.version.is_empty() => record.series.clone(),
        Style::Release => record.version.clone(),
        Style::Fullname if record.version.is_empty() => {
            format!("{} \"{}\"", settings.distro.display_name(), record.codename)
        }
        Style::Fullname => format!(
            "{} {} \"{}\"",
            settings.distro.display_name(),
            record.version,
            record.codename
        ),
    };

    if let Some(milestone) = settings.days {
        match record.days_until(milestone, date) {
            Some(days) => line.push_str(&format!(" {days}")),
            None => line.push_str(" (unknown)"),
        }
    }
    line
}

fn parse_codename(value: &str) -> Result<String, String> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_lowercase()) {
        Ok(value.to_string())
    } else {
        Err(format!("invalid distribution codename `{value}`"))
    }
}

fn parse_query_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("invalid date `{value}`"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trusty() -> ReleaseRecord {
        ReleaseRecord::new("trusty", ymd(2013, 10, 17))
            .with_version("14.04 LTS")
            .with_codename("Trusty Tahr")
            .with_release(ymd(2014, 4, 17))
            .with_eol(ymd(2019, 4, 25))
    }

    fn settings(style: Style, days: Option<Milestone>) -> OutputSettings {
        OutputSettings {
            distro: Distro::Ubuntu,
            style,
            days,
            format: CliOutputFormat::Text,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_selector() {
        assert!(Cli::try_parse_from(["distro-info", "debian"]).is_err());
        assert!(Cli::try_parse_from(["distro-info", "debian", "--stable", "--devel"]).is_err());
        assert!(Cli::try_parse_from(["distro-info", "ubuntu", "--testing"]).is_err());
        assert!(Cli::try_parse_from(["distro-info", "ubuntu", "--lts"]).is_ok());
    }

    #[test]
    fn test_days_defaults_to_release() {
        let cli = Cli::try_parse_from(["distro-info", "ubuntu", "-s", "-y"]).unwrap();
        let DistroCommand::Ubuntu(args) = cli.distro else {
            panic!("expected ubuntu subcommand");
        };
        assert_eq!(args.output.days, Some(Milestone::Release));

        let cli = Cli::try_parse_from(["distro-info", "ubuntu", "-s", "--days=eol-server"]).unwrap();
        let DistroCommand::Ubuntu(args) = cli.distro else {
            panic!("expected ubuntu subcommand");
        };
        assert_eq!(args.output.days, Some(Milestone::EolServer));
    }

    #[test]
    fn test_debian_rejects_server_milestone() {
        let cli =
            Cli::try_parse_from(["distro-info", "debian", "-s", "--days=eol-server"]).unwrap();
        let DistroCommand::Debian(args) = cli.distro else {
            panic!("expected debian subcommand");
        };
        assert!(OutputSettings::new(Distro::Debian, &args.output).is_err());
    }

    #[test]
    fn test_alias_selector() {
        let cli = Cli::try_parse_from(["distro-info", "debian", "--alias", "wheezy"]).unwrap();
        let DistroCommand::Debian(args) = cli.distro else {
            panic!("expected debian subcommand");
        };
        assert_eq!(
            DebianQuery::from(args.select),
            DebianQuery::Alias("wheezy".into())
        );
        assert!(Cli::try_parse_from(["distro-info", "debian", "--alias", "Wheezy"]).is_err());
    }

    #[test]
    fn test_parse_query_date() {
        assert_eq!(parse_query_date("2014-04-17").unwrap(), ymd(2014, 4, 17));
        assert!(parse_query_date("2014-04").is_err());
        assert!(parse_query_date("2014-02-30").is_err());
    }

    #[test]
    fn test_parse_codename() {
        assert!(parse_codename("sid").is_ok());
        assert!(parse_codename("").is_err());
        assert!(parse_codename("sid2").is_err());
    }

    #[test]
    fn test_text_line_styles() {
        let record = trusty();
        let date = ymd(2014, 4, 10);
        assert_eq!(text_line(&record, &settings(Style::Codename, None), date), "trusty");
        assert_eq!(text_line(&record, &settings(Style::Release, None), date), "14.04 LTS");
        assert_eq!(
            text_line(&record, &settings(Style::Fullname, None), date),
            "Ubuntu 14.04 LTS \"Trusty Tahr\""
        );
    }

    #[test]
    fn test_text_line_days() {
        let record = trusty();
        let date = ymd(2014, 4, 10);
        assert_eq!(
            text_line(&record, &settings(Style::Codename, Some(Milestone::Release)), date),
            "trusty 7"
        );
        assert_eq!(
            text_line(&record, &settings(Style::Codename, Some(Milestone::EolServer)), date),
            "trusty (unknown)"
        );
    }

    #[test]
    fn test_release_style_keeps_version_with_unknown_days() {
        let record = trusty();
        let unknown = settings(Style::Release, Some(Milestone::EolServer));
        assert_eq!(text_line(&record, &unknown, ymd(2014, 4, 10)), "14.04 LTS (unknown)");
    }

    #[test]
    fn test_release_style_falls_back_to_series() {
        let sid = ReleaseRecord::new("sid", ymd(1993, 8, 16)).with_codename("Sid");
        let mut debian = settings(Style::Release, None);
        debian.distro = Distro::Debian;
        assert_eq!(text_line(&sid, &debian, ymd(2014, 1, 1)), "sid");

        debian.style = Style::Fullname;
        assert_eq!(text_line(&sid, &debian, ymd(2014, 1, 1)), "Debian \"Sid\"");
    }

    #[test]
    fn test_render_json() {
        let record = trusty();
        let answer = Answer::Records(vec![&record]);
        let mut json = settings(Style::Codename, Some(Milestone::Eol));
        json.format = CliOutputFormat::Json;

        let raw = render(&answer, &json, ymd(2019, 4, 20)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["series"], "trusty");
        assert_eq!(value[0]["release"], "2014-04-17");
        assert_eq!(value[0]["eol-server"], serde_json::Value::Null);
        assert_eq!(value[0]["days"], 5);
    }

    #[test]
    fn test_render_alias() {
        let answer = Answer::Alias("stable".into());
        let text = settings(Style::Codename, None);
        assert_eq!(render(&answer, &text, ymd(2014, 1, 1)).unwrap(), "stable\n");
    }
}
