//! Nearby-station matching over the station reference set.
//!
//! Plain linear scans; the station set is a few hundred entries and the
//! matcher runs once per saved location per hourly cycle.

use crate::db::models::Station;
use crate::geo::distance_km;

/// All stations within `radius_km` of the coordinate, paired with their
/// distance. Input order is preserved; callers sort when they need to.
pub fn nearby(
    stations: &[Station],
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Vec<(&Station, f64)> {
    stations
        .iter()
        .filter_map(|station| {
            let dist = distance_km(latitude, longitude, station.latitude, station.longitude);
            (dist <= radius_km).then_some((station, dist))
        })
        .collect()
}

/// The single closest station, or `None` when the station set is empty.
/// Ties resolve to the first station in input order.
pub fn nearest(stations: &[Station], latitude: f64, longitude: f64) -> Option<(&Station, f64)> {
    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let dist = distance_km(latitude, longitude, station.latitude, station.longitude);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((station, dist)),
        }
    }
    best
}
