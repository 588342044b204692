//! Text rendering for CLI output.

use std::fmt::Write as _;

use crate::airports::{self, Airport};
use crate::flight::schedule::{format_date_time, format_time};
use crate::flight::{FlightRecord, LiveTelemetry, StatusColor};
use crate::service::Direction;

const RESET: &str = "\x1b[0m";

/// Status label, colored when `color` is set.
#[must_use]
pub fn status(label: &str, color: bool) -> String {
    if color {
        format!("{}{label}{RESET}", StatusColor::for_status(label).ansi())
    } else {
        label.to_string()
    }
}

/// One-line summary of a flight.
#[must_use]
pub fn flight_line(flight: &FlightRecord, color: bool) -> String {
    format!(
        "{}  {}  {}  {} → {}  {}",
        flight.flight_number,
        flight.airline,
        flight.route(),
        format_time(&flight.departure.scheduled_time),
        format_time(&flight.arrival.scheduled_time),
        status(&flight.status, color),
    )
}

/// Flights as an aligned table.
#[must_use]
pub fn flight_table(flights: &[FlightRecord], color: bool) -> String {
    let header = ["FLIGHT", "AIRLINE", "ROUTE", "DEP", "ARR", "STATUS"];
    let rows: Vec<[String; 6]> = flights
        .iter()
        .map(|f| {
            [
                f.flight_number.clone(),
                f.airline.clone(),
                f.route(),
                format_time(&f.departure.scheduled_time),
                format_time(&f.arrival.scheduled_time),
                f.status.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(str::to_string), &widths, None);
    for row in &rows {
        let colored = color.then(|| status(&row[5], true));
        push_row(&mut out, row, &widths, colored.as_deref());
    }
    out
}

// The status column is last, so a colored replacement never needs padding
fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6], status: Option<&str>) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 5 {
            line.push_str(status.unwrap_or(cell));
        } else {
            let _ = write!(line, "{cell:<width$}  ");
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Full details of one flight.
#[must_use]
pub fn flight_details(flight: &FlightRecord, progress: f64, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", flight.flight_number, flight.airline);
    let _ = writeln!(out, "Status:    {}", status(&flight.status, color));
    let _ = writeln!(out, "Progress:  {progress:.0}%");
    let _ = writeln!(out);

    for (label, end) in [("Departure", &flight.departure), ("Arrival", &flight.arrival)] {
        let _ = writeln!(out, "{label}: {} ({})", end.airport_name, end.iata_code);
        let _ = writeln!(out, "  Scheduled: {}", format_date_time(&end.scheduled_time));
        let _ = writeln!(out, "  Estimated: {}", format_date_time(&end.estimated_time));
        if !end.actual_time.is_empty() {
            let _ = writeln!(out, "  Actual:    {}", format_date_time(&end.actual_time));
        }
        let _ = writeln!(out, "  Terminal:  {}", or_dash(&end.terminal));
        let _ = writeln!(out, "  Gate:      {}", or_dash(&end.gate));
    }

    let aircraft = &flight.aircraft;
    if !aircraft.registration.is_empty() || !aircraft.type_code.is_empty() {
        let _ = writeln!(
            out,
            "Aircraft:  {} ({})",
            or_dash(&aircraft.registration),
            or_dash(&aircraft.type_code)
        );
    }

    if let Some(live) = &flight.live {
        let _ = writeln!(out, "Live:      {}", live_summary(live));
    }
    out
}

/// Position, altitude, speed and heading on one line.
#[must_use]
pub fn live_summary(live: &LiveTelemetry) -> String {
    format!(
        "{:.4}, {:.4}  alt {:.0} ft  {:.0} km/h  hdg {:.0}°",
        live.latitude, live.longitude, live.altitude_feet, live.ground_speed, live.heading_degrees
    )
}

/// Title for an explore listing, naming the airport when it is a major one.
#[must_use]
pub fn explore_heading(airport: Option<&str>, direction: Direction) -> String {
    let side = match direction {
        Direction::Departure => "Departures",
        Direction::Arrival => "Arrivals",
    };
    match airport {
        None => format!("{side} from all airports"),
        Some(code) => match airports::find(code) {
            Some(known) => format!("{side} at {} ({}, {})", known.code, known.name, known.city),
            None => format!("{side} at {}", code.to_uppercase()),
        },
    }
}

/// The airport catalogue as a table.
#[must_use]
pub fn airport_table(airports: &[Airport]) -> String {
    let name_width = airports
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let _ = writeln!(out, "CODE  {:<name_width$}  CITY", "NAME");
    for airport in airports {
        let _ = writeln!(
            out,
            "{:<4}  {:<name_width$}  {}",
            airport.code, airport.name, airport.city
        );
    }
    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
