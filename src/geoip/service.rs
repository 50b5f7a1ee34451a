//! GeoIP lookup service using a MaxMind GeoLite2/GeoIP2 City MMDB
//!
//! The database is memory-mapped once at startup and shared read-only
//! between requests.

use anyhow::{Context, Result};
use maxminddb::{geoip2, Mmap, Reader};
use std::net::IpAddr;
use std::sync::Arc;

use super::{GeoError, GeoLookup, Location};

/// City database reader
#[derive(Clone)]
pub struct GeoIpService {
    reader: Arc<Reader<Mmap>>,
}

impl GeoIpService {
    /// Open a City database
    ///
    /// # Arguments
    /// * `path` - Path to the MaxMind GeoLite2-City or GeoIP2-City .mmdb file
    pub fn open(path: &str) -> Result<Self> {
        let reader = unsafe { Reader::open_mmap(path) }
            .with_context(|| format!("Failed to open GeoIP City database at {}", path))?;

        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    fn extract_from_city(city: &geoip2::City) -> Location {
        Location {
            city: city.city.names.english.map(|s| s.to_string()),
            country: city.country.names.english.map(|s| s.to_string()),
            iso_code: city.country.iso_code.map(|s| s.to_string()),
            continent: city.continent.names.english.map(|s| s.to_string()),
            latitude: city.location.latitude,
            longitude: city.location.longitude,
        }
    }
}

impl GeoLookup for GeoIpService {
    fn locate(&self, ip: IpAddr) -> Result<Location, GeoError> {
        let result = self.reader.lookup(ip)?;

        Ok(result
            .decode::<geoip2::City>()?
            .map(|city| Self::extract_from_city(&city))
            .unwrap_or_default())
    }
}
