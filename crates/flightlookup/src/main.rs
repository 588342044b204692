//! `flookup` - CLI for flightlookup
//!
//! This binary searches flights, manages saved flights, and runs the JSON
//! API server.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use tracing::{debug, info};

use flightlookup::airports::MAJOR_AIRPORTS;
use flightlookup::cli::{
    Cli, Command, ConfigCommand, ExploreCommand, FlightCommand, LiveCommand, OutputFormat,
    SavedCommand, SearchCommand, ServeCommand, WatchCommand,
};
use flightlookup::config::REDACTED;
use flightlookup::flight::schedule::progress;
use flightlookup::flight::{normalize_value, normalize_with_fallback};
use flightlookup::mock::MOCK_MESSAGE;
use flightlookup::{
    init_logging, render, server, tracker, Config, FlightRecord, FlightService, SavedFlights,
    Source, StatusFilter, Storage,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // `config validate` reports load failures itself
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        return handle_validate(file.clone().or_else(|| cli.config.clone()));
    }

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let color = std::io::stdout().is_terminal();

    match cli.command {
        Command::Serve(cmd) => handle_serve(&config, &cmd).await,
        Command::Search(cmd) => handle_search(&config, &cmd, color).await,
        Command::Explore(cmd) => handle_explore(&config, &cmd, color).await,
        Command::Flight(cmd) => handle_flight(&config, &cmd, color).await,
        Command::Live(cmd) => handle_live(&config, &cmd).await,
        Command::Watch(cmd) => handle_watch(&config, &cmd, color).await,
        Command::Saved(cmd) => handle_saved(&config, &cmd, color).await,
        Command::Airports(cmd) => handle_airports(cmd.format),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn service(config: &Config) -> Result<FlightService> {
    FlightService::from_config(&config.upstream).context("failed to create provider client")
}

async fn handle_serve(config: &Config, cmd: &ServeCommand) -> Result<()> {
    let bind = cmd.bind.unwrap_or(config.server.bind);
    info!(%bind, "Starting server");
    server::serve(service(config)?, bind, config.request_timeout()).await?;
    Ok(())
}

fn print_flights(flights: &[FlightRecord], format: OutputFormat, color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(flights)?),
        OutputFormat::Table => print!("{}", render::flight_table(flights, color)),
        OutputFormat::Plain => {
            for flight in flights {
                println!("{}", render::flight_line(flight, color));
            }
        }
    }
    Ok(())
}

fn filtered(data: &[serde_json::Value], status: &StatusFilter) -> Vec<FlightRecord> {
    data.iter()
        .map(normalize_value)
        .filter(|f| status.matches(&f.status))
        .collect()
}

async fn handle_search(config: &Config, cmd: &SearchCommand, color: bool) -> Result<()> {
    let (query, envelope) = service(config)?.search(&cmd.query).await?;
    debug!(%query, "Interpreted search");

    let flights = filtered(&envelope.data, &cmd.status);
    if flights.is_empty() && cmd.format != OutputFormat::Json {
        println!("No flights found for {query}");
        return Ok(());
    }
    print_flights(&flights, cmd.format, color)
}

async fn handle_explore(config: &Config, cmd: &ExploreCommand, color: bool) -> Result<()> {
    let envelope = service(config)?
        .explore(cmd.airport.as_deref(), cmd.direction(), cmd.limit)
        .await?;

    let flights = filtered(&envelope.data, &cmd.status);
    if cmd.format != OutputFormat::Json {
        println!("{}", render::explore_heading(cmd.airport.as_deref(), cmd.direction()));
        if flights.is_empty() {
            println!("No flights found");
            return Ok(());
        }
    }
    print_flights(&flights, cmd.format, color)
}

async fn handle_flight(config: &Config, cmd: &FlightCommand, color: bool) -> Result<()> {
    let service = service(config)?;

    let (raw, source) = if cmd.strict {
        (service.flight(&cmd.flight_number).await?, Source::Api)
    } else {
        let details = service.flight_details(&cmd.flight_number).await;
        (details.flight, details.source)
    };
    let flight = normalize_with_fallback(&raw, &cmd.flight_number);

    match cmd.format {
        OutputFormat::Json => {
            let body = json!({"flight": flight, "source": source});
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => print!("{}", render::flight_table(&[flight], color)),
        OutputFormat::Plain => {
            if source == Source::Mock {
                println!("({MOCK_MESSAGE})");
            }
            print!(
                "{}",
                render::flight_details(&flight, progress(&flight, Utc::now()), color)
            );
        }
    }
    Ok(())
}

async fn handle_live(config: &Config, cmd: &LiveCommand) -> Result<()> {
    let live = service(config)?.live(&cmd.flight_number).await?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&live)?);
        return Ok(());
    }

    let Some(first) = live.flights.first() else {
        println!("No flights found for {}", cmd.flight_number);
        return Ok(());
    };
    let flight = normalize_with_fallback(first, &cmd.flight_number);
    match &flight.live {
        Some(telemetry) => println!("{}  {}", flight.flight_number, render::live_summary(telemetry)),
        None => println!("{}  no live position available", flight.flight_number),
    }
    Ok(())
}

async fn handle_watch(config: &Config, cmd: &WatchCommand, color: bool) -> Result<()> {
    let service = service(config)?;
    let interval = Duration::from_secs(cmd.interval);

    let tracking = tracker::track(&service, &cmd.flight_number, interval, cmd.count, |update| {
        let flight = update.flight;
        let position = flight
            .live
            .as_ref()
            .map_or_else(|| "no live position".to_string(), render::live_summary);
        println!(
            "[{}] {}  {}  {}",
            Utc::now().format("%H:%M:%S"),
            flight.flight_number,
            render::status(&flight.status, color),
            position
        );
    });

    tokio::select! {
        summary = tracking => {
            info!(
                delivered = summary.delivered,
                superseded = summary.superseded,
                failed = summary.failed,
                "Finished watching"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Stopped watching");
        }
    }
    Ok(())
}

async fn handle_saved(config: &Config, cmd: &SavedCommand, color: bool) -> Result<()> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    match cmd {
        SavedCommand::Profiles => {
            for profile in storage.profiles()? {
                println!("{profile}");
            }
            return Ok(());
        }
        SavedCommand::Stats => return print_storage_stats(&storage),
        _ => {}
    }

    let profile = cmd.profile().unwrap_or(&config.saved.profile);
    let saved = SavedFlights::new(storage.profile(profile));
    debug!(profile = saved.store().name(), "Using saved-flights profile");

    match cmd {
        SavedCommand::List {
            details, format, ..
        } => {
            let numbers = saved.list()?;
            if !*details {
                if *format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&numbers)?);
                } else if numbers.is_empty() {
                    println!("No saved flights");
                } else {
                    for number in &numbers {
                        println!("{number}");
                    }
                }
                return Ok(());
            }

            let service = service(config)?;
            let mut flights = Vec::with_capacity(numbers.len());
            for number in &numbers {
                match service.flight(number).await {
                    Ok(raw) => flights.push(normalize_with_fallback(&raw, number)),
                    Err(e) => eprintln!("{number}: {e}"),
                }
            }
            print_flights(&flights, *format, color)?;
        }
        SavedCommand::Toggle { flight_number, .. } => {
            if saved.toggle(flight_number)? {
                println!("Saved {flight_number}");
            } else {
                println!("Removed {flight_number}");
            }
        }
        SavedCommand::Add { flight_number, .. } => {
            if saved.add(flight_number)? {
                println!("Saved {flight_number}");
            } else {
                println!("{flight_number} is already saved");
            }
        }
        SavedCommand::Remove { flight_number, .. } => {
            if saved.remove(flight_number)? {
                println!("Removed {flight_number}");
            } else {
                println!("{flight_number} was not saved");
            }
        }
        SavedCommand::Show { flight_number, .. } => {
            let state = if saved.is_saved(flight_number)? {
                "saved"
            } else {
                "not saved"
            };
            println!("{flight_number}: {state}");
        }
        SavedCommand::Clear { .. } => {
            if saved.clear()? {
                println!("Cleared saved flights for {profile}");
            } else {
                println!("No saved flights for {profile}");
            }
        }
        SavedCommand::Profiles | SavedCommand::Stats => {}
    }
    Ok(())
}

fn print_storage_stats(storage: &Storage) -> Result<()> {
    let stats = storage.stats()?;
    println!("Database:       {}", storage.path().display());
    println!("Profiles:       {}", stats.total_profiles);
    println!("Stored values:  {}", stats.total_values);
    println!("Size:           {} bytes", stats.db_size_bytes);
    match stats.last_updated {
        Some(at) => println!("Last updated:   {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last updated:   never"),
    }
    Ok(())
}

fn handle_airports(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&MAJOR_AIRPORTS)?),
        OutputFormat::Table => print!("{}", render::airport_table(&MAJOR_AIRPORTS)),
        OutputFormat::Plain => {
            for airport in &MAJOR_AIRPORTS {
                println!("{} {} ({})", airport.code, airport.name, airport.city);
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            } else {
                let key = if config.upstream.access_key.is_empty() {
                    "(not set)"
                } else {
                    REDACTED
                };
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind:               {}", config.server.bind);
                println!("  Request timeout:    {}s", config.server.request_timeout_secs);
                println!();
                println!("[Upstream]");
                println!("  Base URL:           {}", config.upstream.base_url);
                println!("  Access key:         {key}");
                println!("  Search limit:       {}", config.upstream.search_limit);
                println!("  Explore limit:      {}", config.upstream.explore_limit);
                for (name, secs) in config.upstream.timeouts.entries() {
                    println!("  {:<20}{secs}s", format!("{name}:"));
                }
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Saved]");
                println!("  Profile:            {}", config.saved.profile);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { .. } => {}
    }
    Ok(())
}

fn handle_validate(file: Option<std::path::PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => {
            println!("Configuration error: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
