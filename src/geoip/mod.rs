//! IP geolocation
//!
//! Listener addresses are resolved against a MaxMind GeoIP2/GeoLite2 City
//! database. Lookups go through the [`GeoLookup`] trait so the aggregation
//! pipeline can run against any resolver.

pub mod models;
pub mod service;

use std::net::IpAddr;

use thiserror::Error;

pub use models::Location;
pub use service::GeoIpService;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("invalid IP address '{0}'")]
    InvalidIp(String),
    #[error("geoip lookup failed: {0}")]
    Lookup(#[from] maxminddb::MaxMindDbError),
}

pub trait GeoLookup: Send + Sync {
    /// Resolve an address. An address the database does not know resolves
    /// to an empty [`Location`]; only database errors are reported.
    fn locate(&self, ip: IpAddr) -> Result<Location, GeoError>;

    /// Parse and resolve an address as reported by the upstream server.
    fn locate_str(&self, ip: &str) -> Result<Location, GeoError> {
        let addr = ip
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| GeoError::InvalidIp(ip.to_string()))?;
        self.locate(addr)
    }
}
