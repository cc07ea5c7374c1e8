use crate::airports::{AirportTable, Coordinates};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers, using the haversine formula on a
/// sphere of radius 6371 km. Not rounded.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl AirportTable {
    /// Distance between two airports rounded to 2 decimals, or `None` when
    /// either code is not in the table.
    pub fn distance_km(&self, origin: &str, destination: &str) -> Option<f64> {
        let from = self.lookup(origin)?;
        let to = self.lookup(destination)?;
        Some(round2(haversine_km(from, to)))
    }

    /// Same as [`distance_km`](Self::distance_km) but reports an unknown
    /// endpoint as `0.0`. This is the value written to the report.
    pub fn distance(&self, origin: &str, destination: &str) -> f64 {
        self.distance_km(origin, destination).unwrap_or(0.0)
    }
}
