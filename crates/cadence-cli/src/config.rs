use cadence_core::recurrence::ExpansionConfig;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;

use crate::cli::OutputFormat;

const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Limits applied to every expansion
    pub expansion: ExpansionConfig,
    /// Default output format for `expand` and `next`
    pub output: OutputFormat,
    /// Append a relative phrase ("in 2 days") to next-run output
    pub humanize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expansion: ExpansionConfig::default(),
            output: OutputFormat::Table,
            humanize: true,
        }
    }
}

impl Config {
    /// Loads `cadence.toml` (or the file named by `CADENCE_CONFIG`), then
    /// `CADENCE_*` environment variables, over the built-in defaults.
    pub fn new() -> Result<Self, figment::Error> {
        let path = std::env::var("CADENCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::figment(&path).extract()
    }

    fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("CADENCE_").split("__"))
    }
}
