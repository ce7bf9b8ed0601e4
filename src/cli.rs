use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Counts the time since June 12, 2020")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode - only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Live counter with floating hearts (default)
    Live,
    /// Write dark and light SVG cards of the current counter
    Card {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the current counter as JSON
    Json {
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                _ => "debug",
            }
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_live() {
        let cli = Cli::try_parse_from(["anniversary"]).unwrap();
        assert_eq!(cli.command(), Commands::Live);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_card_out_dir() {
        let cli = Cli::try_parse_from(["anniversary", "card", "--out-dir", "out"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Card {
                out_dir: PathBuf::from("out")
            }
        );

        let cli = Cli::try_parse_from(["anniversary", "card"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Card {
                out_dir: PathBuf::from(".")
            }
        );
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["anniversary", "-vv", "json", "--pretty"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.command(), Commands::Json { pretty: true });

        let cli = Cli::try_parse_from(["anniversary", "json", "-q"]).unwrap();
        assert_eq!(cli.log_level(), "error");

        assert!(Cli::try_parse_from(["anniversary", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_no_start_date_flag() {
        assert!(Cli::try_parse_from(["anniversary", "--start", "2021-01-01"]).is_err());
    }
}
