//! Geographic coordinates

use serde::{Deserialize, Deserializer, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = String;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) =
            s.split_once(',').ok_or_else(|| format!("expected \"lat,lng\", got {s:?}"))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?;
        let lng: f64 = lng.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("coordinates out of range: {lat},{lng}"));
        }
        Ok(Self { lat, lng })
    }
}

/// Decimal fields arrive either as JSON numbers or as strings
/// (`"12.971599"`), depending on the serializer. Empty strings are `None`.
pub(crate) fn de_opt_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => {
            text.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom)
        }
    }
}
