//! Provider flight shapes as they arrive on the wire.
//!
//! The provider is inconsistent: `airline` and `airport` are sometimes a
//! bare string and sometimes a `{name, iata, icao}` object, scalars are
//! sometimes null, and whole sub-objects go missing. Every field here is
//! lenient: a value of the wrong JSON type reads as absent, so turning any
//! JSON value into a [`RawFlight`] never fails.

use serde::Deserialize;
use serde_json::Value;

/// A field that is either a plain display string or a reference object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NamedRef {
    /// The provider sent the display name directly.
    Name(String),
    /// The provider sent a reference object.
    Entity {
        /// Display name.
        #[serde(default, deserialize_with = "lenient::string")]
        name: Option<String>,
        /// IATA code.
        #[serde(default, deserialize_with = "lenient::string")]
        iata: Option<String>,
        /// ICAO code.
        #[serde(default, deserialize_with = "lenient::string")]
        icao: Option<String>,
    },
}

impl NamedRef {
    /// The display name, if one is present and non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Entity { name, .. } => name.as_deref(),
        }
        .filter(|name| !name.is_empty())
    }

    /// The IATA code carried by a reference object.
    #[must_use]
    pub fn iata(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Entity { iata, .. } => iata.as_deref().filter(|code| !code.is_empty()),
        }
    }
}

/// A raw flight record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFlight {
    /// `{iata, icao, number}` designator object.
    #[serde(default, deserialize_with = "lenient::object")]
    pub flight: Option<RawDesignator>,
    /// Flattened designator, used by the mock records.
    #[serde(default, deserialize_with = "lenient::string")]
    pub flight_number: Option<String>,
    /// Operating airline.
    #[serde(default, deserialize_with = "lenient::object")]
    pub airline: Option<NamedRef>,
    /// Departure leg.
    #[serde(default, deserialize_with = "lenient::object")]
    pub departure: Option<RawEndpoint>,
    /// Arrival leg.
    #[serde(default, deserialize_with = "lenient::object")]
    pub arrival: Option<RawEndpoint>,
    /// Status label.
    #[serde(default, deserialize_with = "lenient::string")]
    pub flight_status: Option<String>,
    /// Aircraft details.
    #[serde(default, deserialize_with = "lenient::object")]
    pub aircraft: Option<RawAircraft>,
    /// Live telemetry; only present for flights in progress.
    #[serde(default, deserialize_with = "lenient::object")]
    pub live: Option<RawLive>,
}

/// The provider's flight designator object.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDesignator {
    #[serde(default, deserialize_with = "lenient::string")]
    pub iata: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icao: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub number: Option<String>,
}

/// One end of a flight.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEndpoint {
    #[serde(default, deserialize_with = "lenient::object")]
    pub airport: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub iata: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub scheduled: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub estimated: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub actual: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gate: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub terminal: Option<String>,
}

/// Aircraft details.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAircraft {
    #[serde(default, deserialize_with = "lenient::string")]
    pub registration: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub iata: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icao: Option<String>,
}

/// Live telemetry, in the provider's units.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLive {
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub altitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub speed_horizontal: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub direction: Option<f64>,
}

impl RawFlight {
    /// Read a raw flight out of arbitrary JSON.
    ///
    /// Anything that isn't an object yields an empty record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Deserializers that turn type mismatches into `None`.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        // Derived structs would also accept arrays positionally
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Array(_) => Ok(None),
            value => Ok(serde_json::from_value(value).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_ref_from_string() {
        let named: NamedRef = serde_json::from_value(json!("Delta Air Lines")).unwrap();
        assert_eq!(named.name(), Some("Delta Air Lines"));
        assert_eq!(named.iata(), None);
    }

    #[test]
    fn test_named_ref_from_object() {
        let named: NamedRef = serde_json::from_value(json!({
            "name": "Los Angeles International",
            "iata": "LAX",
            "icao": "KLAX"
        }))
        .unwrap();
        assert_eq!(named.name(), Some("Los Angeles International"));
        assert_eq!(named.iata(), Some("LAX"));
    }

    #[test]
    fn test_named_ref_object_with_null_name() {
        let named: NamedRef = serde_json::from_value(json!({"name": null, "iata": "JFK"})).unwrap();
        assert_eq!(named.name(), None);
        assert_eq!(named.iata(), Some("JFK"));
    }

    #[test]
    fn test_named_ref_empty_name_is_absent() {
        let named: NamedRef = serde_json::from_value(json!("")).unwrap();
        assert_eq!(named.name(), None);
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(RawFlight::from_value(&json!(null)), RawFlight::default());
        assert_eq!(RawFlight::from_value(&json!("AA123")), RawFlight::default());
        assert_eq!(RawFlight::from_value(&json!([1, 2])), RawFlight::default());
    }

    #[test]
    fn test_wrong_types_read_as_absent() {
        let raw = RawFlight::from_value(&json!({
            "flight_status": 42,
            "airline": 17,
            "departure": "JFK",
            "aircraft": {"registration": {"nested": true}},
            "live": {"latitude": "40.5", "longitude": null, "altitude": true}
        }));

        assert_eq!(raw.flight_status.as_deref(), Some("42"));
        assert!(raw.airline.is_none());
        assert!(raw.departure.is_none());
        assert_eq!(raw.aircraft, Some(RawAircraft::default()));

        let live = raw.live.unwrap();
        assert_eq!(live.latitude, Some(40.5));
        assert_eq!(live.longitude, None);
        assert_eq!(live.altitude, None);
    }

    #[test]
    fn test_null_live_is_absent() {
        let raw = RawFlight::from_value(&json!({"live": null}));
        assert!(raw.live.is_none());
    }

    #[test]
    fn test_array_sub_object_is_absent() {
        let raw = RawFlight::from_value(&json!({"airline": ["Delta"], "departure": [1, 2]}));
        assert!(raw.airline.is_none());
        assert!(raw.departure.is_none());
    }
}
