//! Major airports offered by the explore browser.

use serde::Serialize;

/// A well-known airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    /// IATA code.
    pub code: &'static str,
    /// Airport name.
    pub name: &'static str,
    /// City served.
    pub city: &'static str,
}

/// The airports listed in the explore browser, in display order.
pub const MAJOR_AIRPORTS: [Airport; 10] = [
    Airport { code: "JFK", name: "John F Kennedy International", city: "New York" },
    Airport { code: "LAX", name: "Los Angeles International", city: "Los Angeles" },
    Airport { code: "LHR", name: "London Heathrow", city: "London" },
    Airport { code: "DXB", name: "Dubai International", city: "Dubai" },
    Airport { code: "CDG", name: "Charles de Gaulle", city: "Paris" },
    Airport { code: "NRT", name: "Narita International", city: "Tokyo" },
    Airport { code: "SYD", name: "Sydney Kingsford Smith", city: "Sydney" },
    Airport { code: "ORD", name: "Chicago O'Hare International", city: "Chicago" },
    Airport { code: "MIA", name: "Miami International", city: "Miami" },
    Airport { code: "SFO", name: "San Francisco International", city: "San Francisco" },
];

/// Look up a major airport by code, ignoring case.
#[must_use]
pub fn find(code: &str) -> Option<&'static Airport> {
    MAJOR_AIRPORTS
        .iter()
        .find(|airport| airport.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("nrt").map(|a| a.city), Some("Tokyo"));
        assert_eq!(find("LHR").map(|a| a.name), Some("London Heathrow"));
        assert!(find("XXX").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = MAJOR_AIRPORTS.iter().map(|a| a.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MAJOR_AIRPORTS.len());
    }
}
