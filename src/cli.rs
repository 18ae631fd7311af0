/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, OutputFormat};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Parser, Debug, PartialEq)]
#[clap(name = "elevator-sim", version, about = "Multi-elevator dispatch simulation")]
pub struct Cli {
    /// Number of floors in the building
    pub floors: usize,

    /// Number of elevators
    pub elevators: usize,

    /// Number of calls to generate before the simulation ends
    pub calls: usize,

    /// TOML configuration file [default: config.toml if present]
    #[clap(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds per floor of travel and per unit of think time
    #[clap(long, value_name = "MS")]
    pub time_unit_ms: Option<u64>,

    /// Progress and summary output format
    #[clap(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// What `main` should do with the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    // Help or version text, exit code 0
    Info(clap::Error),
    // Malformed arguments, exit code 1
    Usage(clap::Error),
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Parsed::Run(cli),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Info(e),
            _ => Parsed::Usage(e),
        },
    }
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(time_unit_ms) = self.time_unit_ms {
            config.simulation.time_unit_ms = time_unit_ms;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
