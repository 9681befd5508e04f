//! Command-line flags for enabling the collector.

use crate::collector::{Config, DEFAULT_BATCH_SIZE};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Flag for the output directory
const OUTPUT_DIR_FLAG: &str = "multigas-output-dir";

/// Flag for the number of blocks per batch file
const BATCH_SIZE_FLAG: &str = "multigas-batch-size";

/// Flag for clearing the output directory on start
const CLEAR_OUTPUT_DIR_FLAG: &str = "multigas-clear-output-dir";

/// Default value of [BATCH_SIZE_FLAG] (matches [DEFAULT_BATCH_SIZE])
const DEFAULT_BATCH_SIZE_ARG: &str = "2000";

/// Collector settings parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flags {
    pub output_dir: Option<PathBuf>,
    pub batch_size: usize,
    pub clear_output_dir: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            output_dir: None,
            batch_size: DEFAULT_BATCH_SIZE,
            clear_output_dir: false,
        }
    }
}

impl Flags {
    /// Add the collector flags to `cmd`.
    pub fn augment(cmd: Command) -> Command {
        cmd.arg(
            Arg::new(OUTPUT_DIR_FLAG)
                .long(OUTPUT_DIR_FLAG)
                .help("Directory to write multi-gas batch files to (collection is disabled if unset)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(BATCH_SIZE_FLAG)
                .long(BATCH_SIZE_FLAG)
                .default_value(DEFAULT_BATCH_SIZE_ARG)
                .help("Number of blocks written to each batch file (must be >= 1)")
                .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .arg(
            Arg::new(CLEAR_OUTPUT_DIR_FLAG)
                .long(CLEAR_OUTPUT_DIR_FLAG)
                .help("Remove existing files in the output directory on start")
                .action(ArgAction::SetTrue),
        )
    }

    /// Read the collector flags from matches of a [Command] built with [Flags::augment].
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            output_dir: matches.get_one::<PathBuf>(OUTPUT_DIR_FLAG).cloned(),
            batch_size: matches
                .get_one::<usize>(BATCH_SIZE_FLAG)
                .copied()
                .unwrap_or(DEFAULT_BATCH_SIZE),
            clear_output_dir: matches.get_flag(CLEAR_OUTPUT_DIR_FLAG),
        }
    }

    /// Returns the collector [Config], or `None` if no output directory was provided.
    pub fn config(&self) -> Option<Config> {
        let output_dir = self.output_dir.clone()?;
        if output_dir.as_os_str().is_empty() {
            return None;
        }
        Some(Config {
            output_dir,
            batch_size: self.batch_size,
            clear_output_dir: self.clear_output_dir,
        })
    }
}
