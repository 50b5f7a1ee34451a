//! Request-scoped aggregation models

use serde::Serialize;
use std::collections::BTreeMap;

use crate::geoip::Location;
use crate::icecast::Listener;

/// Placeholder for a city or country the database has no name for
pub const UNKNOWN: &str = "Unknown";

/// A listener together with the mount it is tuned to and its location
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedListener {
    pub mount: String,
    pub listener: Listener,
    pub location: Location,
}

impl ResolvedListener {
    pub fn city(&self) -> String {
        name_or_unknown(self.location.city.as_deref())
    }

    pub fn country(&self) -> String {
        name_or_unknown(self.location.country.as_deref())
    }
}

fn name_or_unknown(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Everything collected for a single request
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Listener count reported by the server, per successfully queried mount
    pub reported: BTreeMap<String, u64>,

    /// Listeners whose address could be resolved
    pub listeners: Vec<ResolvedListener>,
}

/// Grouping key of the metrics view
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocationKey {
    pub mount: String,
    pub city: String,
    pub country: String,
}

/// Listener total for one [`LocationKey`]
///
/// The geo attributes are taken from the first listener seen at the
/// location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationBucket {
    pub total: u64,
    pub iso_code: String,
    pub continent: String,
    pub geohash: String,
}

/// JSON view: listeners per country, then per city
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stats {
    pub total: u64,
    pub countries: BTreeMap<String, CountryStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryStats {
    pub total: u64,
    #[serde(rename = "ISO")]
    pub iso: String,
    pub continent: String,
    pub cities: BTreeMap<String, CityStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CityStats {
    pub total: u64,
    pub geohash: String,
}
