/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("number of {name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_unit_ms: u64,
    pub think_time_min: u64,
    pub think_time_max: u64,
    pub claim_backoff_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_unit_ms: 1000,
            think_time_min: 1,
            think_time_max: 3,
            claim_backoff_ms: 50,
        }
    }
}

impl SimulationConfig {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    pub fn claim_backoff(&self) -> Duration {
        Duration::from_millis(self.claim_backoff_ms)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub min_floors: usize,
    pub max_floors: usize,
    pub min_elevators: usize,
    pub max_elevators: usize,
    pub min_calls: usize,
    pub max_calls: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            min_floors: 2,
            max_floors: 50,
            min_elevators: 2,
            max_elevators: 10,
            min_calls: 2,
            max_calls: 100,
        }
    }
}

#[derive(Deserialize, clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/**
 * The three run parameters taken from the command line, already range checked.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    pub n_floors: u8,
    pub n_elevators: usize,
    pub n_calls: usize,
}

/***************************************/
/*             Public API              */
/***************************************/

/// Loads the TOML configuration.
///
/// With `None` the default `config.toml` is read if it exists, otherwise built-in
/// defaults are used. An explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if !required && !path.exists() {
        log::debug!("No {} found, using built-in defaults", path.display());
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config: Config =
        toml::from_str(&config_str).map_err(|source| ConfigError::Parse { path, source })?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.think_time_min > sim.think_time_max {
            return Err(ConfigError::Invalid(format!(
                "think_time_min ({}) is larger than think_time_max ({})",
                sim.think_time_min, sim.think_time_max
            )));
        }

        let limits = &self.limits;
        if limits.max_floors > u8::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_floors can be at most {}",
                u8::MAX
            )));
        }
        // Two floors are needed for a call to have a destination
        for (name, lowest, min, max) in [
            ("floors", 2, limits.min_floors, limits.max_floors),
            ("elevators", 1, limits.min_elevators, limits.max_elevators),
            ("calls", 1, limits.min_calls, limits.max_calls),
        ] {
            if min < lowest || min > max {
                return Err(ConfigError::Invalid(format!(
                    "limits for {} must satisfy {} <= min <= max, got {}..={}",
                    name, lowest, min, max
                )));
            }
        }
        Ok(())
    }

    pub fn params(
        &self,
        n_floors: usize,
        n_elevators: usize,
        n_calls: usize,
    ) -> Result<SimulationParams, ConfigError> {
        let limits = &self.limits;
        check_range("floors", n_floors, limits.min_floors, limits.max_floors)?;
        check_range("elevators", n_elevators, limits.min_elevators, limits.max_elevators)?;
        check_range("calls", n_calls, limits.min_calls, limits.max_calls)?;

        let n_floors = u8::try_from(n_floors).map_err(|_| ConfigError::OutOfRange {
            name: "floors",
            value: n_floors,
            min: limits.min_floors,
            max: u8::MAX as usize,
        })?;

        Ok(SimulationParams {
            n_floors,
            n_elevators,
            n_calls,
        })
    }
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/***************************************/
/*             Unit tests              */
/***************************************/
