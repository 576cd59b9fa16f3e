use std::path::PathBuf;

use crate::error::{KindredError, KindredResult};
use crate::logging;

pub const DB_ENV: &str = "KINDRED_DB";
pub const LOG_ENV: &str = "KINDRED_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn default_db_path() -> PathBuf {
        PathBuf::from(".data").join("kindred.db")
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Shell(Config),
    Import { config: Config, json_path: PathBuf },
    Help,
}

/// Parses command-line arguments (program name already skipped). Flags win
/// over the environment, which wins over the defaults.
pub fn parse_args<I, E>(args: I, env: E) -> KindredResult<Invocation>
where
    I: IntoIterator<Item = String>,
    E: Fn(&str) -> Option<String>,
{
    let mut args = args.into_iter();
    let mut db_path: Option<PathBuf> = None;
    let mut import_path: Option<PathBuf> = None;
    let mut log_filter: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    KindredError::Other("--file requires a path argument".into())
                })?);
            }
            "--import" => {
                import_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    KindredError::Other("--import requires a JSON file path".into())
                })?);
            }
            "--log" => {
                log_filter = Some(args.next().ok_or_else(|| {
                    KindredError::Other("--log requires a filter such as 'kindred=debug'".into())
                })?);
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            other => {
                return Err(KindredError::Other(format!(
                    "Unknown argument: {}. Use --help for usage information.",
                    other
                )))
            }
        }
    }

    let config = Config {
        db_path: db_path
            .or_else(|| env(DB_ENV).map(PathBuf::from))
            .unwrap_or_else(Config::default_db_path),
        log_filter: log_filter
            .or_else(|| env(LOG_ENV))
            .unwrap_or_else(|| logging::DEFAULT_FILTER.to_string()),
    };

    Ok(match import_path {
        Some(json_path) => Invocation::Import { config, json_path },
        None => Invocation::Shell(config),
    })
}

pub const USAGE: &str = "Kindred - chosen family profiles

Usage: kindred [OPTIONS]

Options:
  -f, --file <PATH>      Database file path (default: .data/kindred.db, env KINDRED_DB)
  --import <JSON_PATH>   Import a document dump into a new database
  --log <FILTER>         Log filter (default: kindred=info, env KINDRED_LOG)
  -h, --help             Show this help";
