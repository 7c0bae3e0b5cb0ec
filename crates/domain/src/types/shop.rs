//! Shops (employers)

use serde::{Deserialize, Serialize};

use super::geo::{de_opt_coordinate, GeoPoint};
use super::Id;

/// A shop as embedded in job listings and returned by `shops/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shop {
    pub id: Id,
    #[serde(default)]
    pub user: Option<Id>,
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de_opt_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_coordinate")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

impl Shop {
    /// Coordinates, when the owner registered both.
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}
