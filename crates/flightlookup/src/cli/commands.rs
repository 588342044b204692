//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::flight::StatusFilter;
use crate::service::Direction;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides configuration)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// What to look for: a route ("JFK to LAX"), an airport ("JFK"),
    /// a flight ("AA123"), or an airline name
    pub query: String,

    /// Only show flights with this status ("all" shows everything)
    #[arg(short, long, default_value = "all")]
    pub status: StatusFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Explore command arguments.
#[derive(Debug, Args)]
pub struct ExploreCommand {
    /// IATA code of the airport to explore; all flights when omitted
    #[arg(short, long)]
    pub airport: Option<String>,

    /// Show arrivals instead of departures
    #[arg(long)]
    pub arrivals: bool,

    /// Maximum number of results (defaults to configuration)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Only show flights with this status ("all" shows everything)
    #[arg(short, long, default_value = "all")]
    pub status: StatusFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ExploreCommand {
    /// The side of the airport being explored.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.arrivals {
            Direction::Arrival
        } else {
            Direction::Departure
        }
    }
}

/// Flight command arguments.
#[derive(Debug, Args)]
pub struct FlightCommand {
    /// Flight designator, e.g. AA123
    pub flight_number: String,

    /// Fail instead of showing sample data when the provider has no answer
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Live command arguments.
#[derive(Debug, Args)]
pub struct LiveCommand {
    /// Flight designator, e.g. AA123
    pub flight_number: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Watch command arguments.
#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Flight designator, e.g. AA123
    pub flight_number: String,

    /// Seconds between refreshes
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Number of refreshes before stopping
    #[arg(short = 'n', long, default_value = "10")]
    pub count: u32,
}

/// Saved-flights commands.
#[derive(Debug, Subcommand)]
pub enum SavedCommand {
    /// List saved flights
    List {
        /// Look up each saved flight and show its details
        #[arg(short, long)]
        details: bool,

        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Save a flight if it isn't saved, unsave it if it is
    Toggle {
        /// Flight designator
        flight_number: String,

        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Save a flight
    Add {
        /// Flight designator
        flight_number: String,

        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Unsave a flight
    Remove {
        /// Flight designator
        flight_number: String,

        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Show whether a flight is saved
    Show {
        /// Flight designator
        flight_number: String,

        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Forget every saved flight in a profile
    Clear {
        /// Profile to use (defaults to configuration)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// List profiles that have saved flights
    Profiles,

    /// Show saved-flights database statistics
    Stats,
}

impl SavedCommand {
    /// The profile named on the command line, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        match self {
            Self::List { profile, .. }
            | Self::Toggle { profile, .. }
            | Self::Add { profile, .. }
            | Self::Remove { profile, .. }
            | Self::Show { profile, .. }
            | Self::Clear { profile } => profile.as_deref(),
            Self::Profiles | Self::Stats => None,
        }
    }
}

/// Airports command arguments.
#[derive(Debug, Args)]
pub struct AirportsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_explore_direction() {
        let mut cmd = ExploreCommand {
            airport: Some("JFK".to_string()),
            arrivals: false,
            limit: None,
            status: StatusFilter::All,
            format: OutputFormat::Table,
        };
        assert_eq!(cmd.direction(), Direction::Departure);

        cmd.arrivals = true;
        assert_eq!(cmd.direction(), Direction::Arrival);
    }

    #[test]
    fn test_saved_command_profile() {
        let cmd = SavedCommand::Toggle {
            flight_number: "AA123".to_string(),
            profile: Some("work".to_string()),
        };
        assert_eq!(cmd.profile(), Some("work"));

        let cmd = SavedCommand::List {
            details: false,
            profile: None,
            format: OutputFormat::Plain,
        };
        assert_eq!(cmd.profile(), None);
        assert_eq!(SavedCommand::Profiles.profile(), None);
        assert_eq!(SavedCommand::Stats.profile(), None);

        let cmd = SavedCommand::Clear {
            profile: Some("travel".to_string()),
        };
        assert_eq!(cmd.profile(), Some("travel"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        assert_eq!(format!("{format:?}"), "Json");
    }
}
