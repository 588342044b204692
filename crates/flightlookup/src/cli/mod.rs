//! Command-line interface for flightlookup.
//!
//! This module provides the CLI structure for the `flookup` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AirportsCommand, ConfigCommand, ExploreCommand, FlightCommand, LiveCommand, OutputFormat,
    SavedCommand, SearchCommand, ServeCommand, WatchCommand,
};

/// flookup - Look up flights, airports and live positions
///
/// Searches an aviation-data provider by route, airport, flight number or
/// airline, keeps a list of saved flights, and can serve the same lookups as
/// a JSON API.
#[derive(Debug, Parser)]
#[command(name = "flookup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the JSON API server
    Serve(ServeCommand),

    /// Search flights by route, airport, flight number or airline
    Search(SearchCommand),

    /// Browse departures or arrivals at an airport
    Explore(ExploreCommand),

    /// Show one flight's details
    Flight(FlightCommand),

    /// Show a flight's live position
    Live(LiveCommand),

    /// Follow a flight, refreshing on an interval
    Watch(WatchCommand),

    /// Manage saved flights
    #[command(subcommand)]
    Saved(SavedCommand),

    /// List the major airports
    Airports(AirportsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
