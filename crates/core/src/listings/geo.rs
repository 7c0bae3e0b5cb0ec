//! Great-circle distance and proximity ranking.

use std::cmp::Ordering;

use localstore_domain::constants::EARTH_RADIUS_KM;
use localstore_domain::{GeoPoint, Shop};

/// Haversine distance between two points in kilometres.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// A shop with its distance from the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedShop<'a> {
    pub shop: &'a Shop,
    /// `None` when the shop has no coordinates.
    pub distance_km: Option<f64>,
}

/// Order shops nearest first. Shops without coordinates go last; ties keep
/// their input order.
#[must_use]
pub fn rank_shops_by_distance<'a, I>(shops: I, origin: GeoPoint) -> Vec<RankedShop<'a>>
where
    I: IntoIterator<Item = &'a Shop>,
{
    let mut ranked: Vec<RankedShop<'a>> = shops
        .into_iter()
        .map(|shop| RankedShop {
            shop,
            distance_km: shop.coordinates().map(|point| haversine_km(origin, point)),
        })
        .collect();

    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}
