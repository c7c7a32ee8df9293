use anyhow::{Context, Result};
use pennywise_calculator::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "PENNYWISE_CONFIG_PATH";
/// File read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "pennywise.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    #[serde(default = "default_percentage_decimals")]
    pub percentage_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
            percentage_decimals: default_percentage_decimals(),
        }
    }
}

impl DisplayConfig {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency_symbol.clone(),
            decimal_separator: self.decimal_separator,
            thousands_separator: self.thousands_separator,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::default(), filter: default_log_filter() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PennywiseConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was absent; built-in defaults are in use.
    Defaults(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PennywiseConfig,
    pub source: ConfigSource,
}

impl PennywiseConfig {
    /// Loads from `path`, else `PENNYWISE_CONFIG_PATH`, else `pennywise.toml`.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)
                    .with_context(|| format!("invalid configuration in '{}'", path.display()))?;
                Ok(LoadedConfig { config, source: ConfigSource::File(path) })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Ok(LoadedConfig { config: Self::default(), source: ConfigSource::Defaults(path) })
            }
            Err(err) => Err(err)
                .with_context(|| format!("failed to read configuration '{}'", path.display())),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides from the process environment.
    pub fn apply_profile(&mut self) -> Vec<&'static str> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies `PENNYWISE_*` overrides read through `lookup` and returns the
    /// names of those that took effect.
    ///
    /// Values that fail to parse are ignored. Runs before logging is set up,
    /// so callers report the result once the subscriber exists.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Vec<&'static str> {
        let mut applied = Vec::new();
        if let Some(symbol) = lookup(CURRENCY_SYMBOL_VAR) {
            self.display.currency_symbol = symbol;
            applied.push(CURRENCY_SYMBOL_VAR);
        }
        if let Some(Ok(decimals)) = lookup(PERCENTAGE_DECIMALS_VAR).map(|v| v.parse::<usize>()) {
            self.display.percentage_decimals = decimals;
            applied.push(PERCENTAGE_DECIMALS_VAR);
        }
        if let Some(Ok(format)) = lookup(LOG_FORMAT_VAR).map(|v| v.parse::<LogFormat>()) {
            self.logging.format = format;
            applied.push(LOG_FORMAT_VAR);
        }
        applied
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

const CURRENCY_SYMBOL_VAR: &str = "PENNYWISE_CURRENCY_SYMBOL";
const PERCENTAGE_DECIMALS_VAR: &str = "PENNYWISE_PERCENTAGE_DECIMALS";
const LOG_FORMAT_VAR: &str = "PENNYWISE_LOG_FORMAT";

fn default_currency_symbol() -> String {
    "R$".to_string()
}
fn default_decimal_separator() -> char {
    ','
}
fn default_thousands_separator() -> char {
    '.'
}
fn default_percentage_decimals() -> usize {
    1
}
fn default_log_filter() -> String {
    "pennywise=info".to_string()
}
