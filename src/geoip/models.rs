//! Resolved location data

/// Geographic location of a listener as resolved from its IP address.
///
/// Every field is optional: the database may know the country of an address
/// but not its city, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    /// City name (English)
    pub city: Option<String>,

    /// Country name (English)
    pub country: Option<String>,

    /// ISO 3166-1 alpha-2 country code (e.g., "US", "GB")
    pub iso_code: Option<String>,

    /// Continent name (English)
    pub continent: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// Latitude/longitude pair, if both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
