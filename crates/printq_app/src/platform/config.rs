use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use printq_core::{Column, TableSchema};
use printq_engine::ApiSettings;
use printq_logging::printq_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "printq.ron";

#[derive(Parser, Debug, Default)]
#[command(name = "printq")]
#[command(about = "Terminal client for the print job queue")]
pub struct Cli {
    /// Base URL of the jobs API, e.g. http://localhost:8000
    #[arg(long, env = "PRINT_QUEUE_API_HOST")]
    pub api_host: Option<String>,

    /// Config file (RON). Defaults to ./printq.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API host configured; pass --api-host, set PRINT_QUEUE_API_HOST or add api_host to printq.ron")]
    MissingApiHost,
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("column list is empty")]
    NoColumns,
    #[error("could not serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub field: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_host: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    /// Derive columns from the first job instead of a declared list.
    pub first_record_columns: bool,
    pub columns: Option<Vec<ColumnConfig>>,
    pub log_destination: LogDestination,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::new(String::new());
        Self {
            api_host: None,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_bytes: api.max_bytes,
            first_record_columns: false,
            columns: None,
            log_destination: LogDestination::default(),
            log_level: None,
        }
    }
}

/// Everything the app needs at startup, with the API host resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub schema: TableSchema,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

/// Reads the config file named on the command line, or `./printq.ron` if it
/// exists. A missing default file means defaults; a missing explicit file is
/// an error.
pub fn load_file(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.to_string(),
    })?;
    printq_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Command line (which already folds in the environment) wins over the file.
pub fn resolve(mut file: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(host) = cli.api_host.as_deref().map(str::trim) {
        if !host.is_empty() {
            file.api_host = Some(host.to_string());
        }
    }
    file
}

pub fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let file = load_file(cli.config.as_deref())?;
    Ok(resolve(file, cli))
}

impl AppConfig {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let api_host = self
            .api_host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .ok_or(ConfigError::MissingApiHost)?;

        let api = ApiSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
            ..ApiSettings::new(api_host)
        };

        let schema = if self.first_record_columns {
            TableSchema::FirstRecord
        } else {
            match &self.columns {
                None => TableSchema::default(),
                Some(columns) if columns.is_empty() => return Err(ConfigError::NoColumns),
                Some(columns) => TableSchema::Declared(
                    columns
                        .iter()
                        .map(|column| Column::new(&column.field, &column.label))
                        .collect(),
                ),
            }
        };

        let log_level = match self.log_level.as_deref() {
            None => printq_logging::default_level(),
            Some(name) => printq_logging::parse_level(name)
                .ok_or_else(|| ConfigError::LogLevel(name.to_string()))?,
        };

        Ok(Settings {
            api,
            schema,
            log_destination: self.log_destination,
            log_level,
        })
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }
}
