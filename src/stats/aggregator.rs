//! Grouping of resolved listeners by location

use std::collections::BTreeMap;

use crate::geoip::Location;
use crate::stats::models::{
    CityStats, CountryStats, LocationBucket, LocationKey, Snapshot, Stats,
};

/// Geohash length used for metric labels (roughly 20km cells)
pub const METRICS_GEOHASH_PRECISION: usize = 4;

/// Geohash length used in the JSON view
pub const JSON_GEOHASH_PRECISION: usize = 12;

/// Geohash of a location's coordinates, or an empty string when the
/// coordinates are unknown or out of range.
pub fn geohash(location: &Location, precision: usize) -> String {
    location
        .coordinates()
        .and_then(|(lat, lon)| ::geohash::encode(::geohash::Coord { x: lon, y: lat }, precision).ok())
        .unwrap_or_default()
}

/// Group listeners by mount, city and country
pub fn by_location(snapshot: &Snapshot) -> BTreeMap<LocationKey, LocationBucket> {
    let mut buckets = BTreeMap::new();

    for resolved in &snapshot.listeners {
        let key = LocationKey {
            mount: resolved.mount.clone(),
            city: resolved.city(),
            country: resolved.country(),
        };

        buckets
            .entry(key)
            .and_modify(|bucket: &mut LocationBucket| bucket.total += 1)
            .or_insert_with(|| LocationBucket {
                total: 1,
                iso_code: resolved.location.iso_code.clone().unwrap_or_default(),
                continent: resolved.location.continent.clone().unwrap_or_default(),
                geohash: geohash(&resolved.location, METRICS_GEOHASH_PRECISION),
            });
    }

    buckets
}

/// Group listeners by country, then by city
pub fn by_country(snapshot: &Snapshot) -> Stats {
    let mut stats = Stats::default();

    for resolved in &snapshot.listeners {
        stats.total += 1;

        let country = stats
            .countries
            .entry(resolved.country())
            .or_insert_with(|| CountryStats {
                iso: resolved.location.iso_code.clone().unwrap_or_default(),
                continent: resolved.location.continent.clone().unwrap_or_default(),
                ..Default::default()
            });
        country.total += 1;

        country
            .cities
            .entry(resolved.city())
            .and_modify(|city| city.total += 1)
            .or_insert_with(|| CityStats {
                total: 1,
                geohash: geohash(&resolved.location, JSON_GEOHASH_PRECISION),
            });
    }

    stats
}
