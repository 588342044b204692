//! Status labels.
//!
//! Status is an open vocabulary; only a handful of labels get a color.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Display color for a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    /// Scheduled or in the air.
    Green,
    /// Running late.
    Yellow,
    /// Cancelled.
    Red,
    /// Landed.
    Blue,
    /// Boarding.
    Purple,
    /// Anything else.
    Gray,
}

impl StatusColor {
    /// Color for a status label, ignoring case.
    #[must_use]
    pub fn for_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "scheduled" | "active" => Self::Green,
            "delayed" => Self::Yellow,
            "cancelled" => Self::Red,
            "landed" => Self::Blue,
            "boarding" => Self::Purple,
            _ => Self::Gray,
        }
    }

    /// ANSI escape sequence for terminal output.
    #[must_use]
    pub fn ansi(self) -> &'static str {
        match self {
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Red => "\x1b[31m",
            Self::Blue => "\x1b[34m",
            Self::Purple => "\x1b[35m",
            Self::Gray => "\x1b[90m",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Gray => "gray",
        };
        f.write_str(name)
    }
}

/// Filter applied to a result list by status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep flights whose status equals this label exactly.
    Only(String),
}

impl StatusFilter {
    /// Whether a status label passes the filter.
    #[must_use]
    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_colors() {
        assert_eq!(StatusColor::for_status("scheduled"), StatusColor::Green);
        assert_eq!(StatusColor::for_status("active"), StatusColor::Green);
        assert_eq!(StatusColor::for_status("delayed"), StatusColor::Yellow);
        assert_eq!(StatusColor::for_status("cancelled"), StatusColor::Red);
        assert_eq!(StatusColor::for_status("landed"), StatusColor::Blue);
        assert_eq!(StatusColor::for_status("boarding"), StatusColor::Purple);
    }

    #[test]
    fn test_color_ignores_case() {
        assert_eq!(StatusColor::for_status("DELAYED"), StatusColor::Yellow);
        assert_eq!(StatusColor::for_status("Landed"), StatusColor::Blue);
    }

    #[test]
    fn test_unknown_status_is_gray() {
        assert_eq!(StatusColor::for_status("diverted"), StatusColor::Gray);
        assert_eq!(StatusColor::for_status("unknown"), StatusColor::Gray);
        assert_eq!(StatusColor::for_status(""), StatusColor::Gray);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(StatusColor::Purple.to_string(), "purple");
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "landed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only("landed".to_string())
        );
    }

    #[test]
    fn test_filter_matches_exactly() {
        let filter = StatusFilter::Only("active".to_string());
        assert!(filter.matches("active"));
        assert!(!filter.matches("Active"));
        assert!(!filter.matches("landed"));
        assert!(StatusFilter::All.matches("anything"));
    }
}
