//! Weather records exchanged over the HTTP API and held by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest known weather for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city: String,
    pub temperature: f64,
    pub humidity: i64,
    pub updated_at: DateTime<Utc>,
}

/// Body accepted by the update endpoint.
///
/// Only the measured values are read. A `city` or `updated_at` sent by the
/// client is ignored: the city comes from the request path and the timestamp
/// is assigned when the update is accepted. Absent measurements default to
/// zero; a present one must have the right type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherUpdate {
    pub temperature: f64,
    pub humidity: i64,
}

impl WeatherUpdate {
    /// Decode an update body. A JSON `null` counts as an empty update.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// Turn the update into a stored observation for `city`, stamped at `at`.
    pub fn into_observation(
        self,
        city: impl Into<String>,
        at: DateTime<Utc>,
    ) -> WeatherObservation {
        WeatherObservation {
            city: city.into(),
            temperature: self.temperature,
            humidity: self.humidity,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observation_serializes_with_rfc3339_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let obs = WeatherObservation {
            city: "Berlin".into(),
            temperature: 18.5,
            humidity: 60,
            updated_at: at,
        };

        let value = serde_json::to_value(&obs).unwrap();
        assert_eq!(
            value,
            json!({
                "city": "Berlin",
                "temperature": 18.5,
                "humidity": 60,
                "updated_at": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn update_ignores_client_city_and_timestamp() {
        let update: WeatherUpdate = serde_json::from_value(json!({
            "city": "X",
            "temperature": 3.0,
            "humidity": 91,
            "updated_at": "1999-01-01T00:00:00Z",
        }))
        .unwrap();

        let now = Utc::now();
        let obs = update.into_observation("Oslo", now);
        assert_eq!(obs.city, "Oslo");
        assert_eq!(obs.updated_at, now);
        assert_eq!(obs.humidity, 91);
    }

    #[test]
    fn missing_measurements_default_to_zero() {
        let update: WeatherUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(update, WeatherUpdate::default());

        let update: WeatherUpdate =
            serde_json::from_value(json!({ "temperature": 1.5 })).unwrap();
        assert_eq!(update.temperature, 1.5);
        assert_eq!(update.humidity, 0);
    }

    #[test]
    fn null_body_is_an_empty_update() {
        assert_eq!(WeatherUpdate::from_json(b"null").unwrap(), WeatherUpdate::default());
    }

    #[test]
    fn mistyped_or_non_json_body_is_rejected() {
        assert!(WeatherUpdate::from_json(br#"{"temperature":"warm","humidity":10}"#).is_err());
        assert!(WeatherUpdate::from_json(br#"{"humidity":60.5}"#).is_err());
        assert!(WeatherUpdate::from_json(br#""sunny""#).is_err());
        assert!(WeatherUpdate::from_json(b"{not json").is_err());
        assert!(WeatherUpdate::from_json(b"").is_err());
    }
}
