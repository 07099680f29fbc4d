//! Command-line interface argument parsing.

use campaign_board::FilterSelection;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Campaign Board - crowdfunding campaign cards in the terminal
///
/// Shows summary stats, the two top-funded games, and a card list
/// filterable by funding status.
///
/// Examples:
///   campaign-board
///   campaign-board print --filter unfunded
///   campaign-board --data campaigns.csv print --format json
///   campaign-board init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Campaign data file (.json or .csv)
    ///
    /// Falls back to [data].path in the config, then the bundled sample.
    #[arg(short, long, value_name = "FILE", env = "CAMPAIGN_BOARD_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .campaign-board.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the board once and print every view slot
    Print {
        /// Card filter: all, funded or unfunded
        #[arg(short, long)]
        filter: Option<FilterSelection>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Interactive terminal board
    Tui,

    /// Write a default .campaign-board.toml
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Subcommand to run when none is given
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or_else(|| {
            if cfg!(feature = "tui") {
                Command::Tui
            } else {
                Command::Print {
                    filter: None,
                    format: OutputFormat::Text,
                }
            }
        })
    }

    /// Log filter directive; `configured` comes from the config file
    pub fn log_directive<'a>(&self, configured: &'a str) -> &'a str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print_with_filter() {
        let args = Args::try_parse_from(["campaign-board", "print", "--filter", "funded", "--format", "json"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Print {
                filter: Some(FilterSelection::Funded),
                format: OutputFormat::Json,
            })
        );
    }

    #[test]
    fn test_rejects_unknown_filter() {
        let result = Args::try_parse_from(["campaign-board", "print", "--filter", "half"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["campaign-board", "print", "--data", "games.csv", "-v"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("games.csv")));
        assert!(args.verbose);
        assert_eq!(args.log_directive("info"), "debug");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["campaign-board", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_log_directive_defaults_to_config() {
        let args = Args::try_parse_from(["campaign-board", "print"]).unwrap();
        assert_eq!(args.log_directive("warn"), "warn");

        let quiet = Args::try_parse_from(["campaign-board", "-q", "print"]).unwrap();
        assert_eq!(quiet.log_directive("info"), "error");
    }
}
