//! Listener aggregation
//!
//! Each request builds a fresh [`Snapshot`] through the [`Collector`] and
//! groups it either per location (metrics) or per country and city (JSON).

pub mod aggregator;
pub mod collector;
pub mod models;

pub use aggregator::{by_country, by_location};
pub use collector::Collector;
pub use models::{
    CityStats, CountryStats, LocationBucket, LocationKey, ResolvedListener, Snapshot, Stats,
    UNKNOWN,
};
