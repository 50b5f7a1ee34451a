//! Prometheus exposition of a snapshot
//!
//! A fresh registry is built for every scrape so the output only ever
//! contains the locations seen in that scrape.

use prometheus::{GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::stats::{by_location, Snapshot};

const NAMESPACE: &str = "icestats";

const CLIENT_LABELS: [&str; 6] = ["city", "country", "geohash", "ISO", "Continent", "mount"];

pub fn render(snapshot: &Snapshot) -> prometheus::Result<String> {
    let registry = Registry::new();

    let clients = GaugeVec::new(
        Opts::new("clients", "Number of clients connected per location").namespace(NAMESPACE),
        &CLIENT_LABELS,
    )?;
    registry.register(Box::new(clients.clone()))?;

    let listeners = IntGaugeVec::new(
        Opts::new("listeners", "Number of listeners reported by the server per mount")
            .namespace(NAMESPACE),
        &["mount"],
    )?;
    registry.register(Box::new(listeners.clone()))?;

    for (key, bucket) in by_location(snapshot) {
        clients
            .with_label_values(&[
                key.city.as_str(),
                key.country.as_str(),
                bucket.geohash.as_str(),
                bucket.iso_code.as_str(),
                bucket.continent.as_str(),
                key.mount.as_str(),
            ])
            .set(bucket.total as f64);
    }

    for (mount, reported) in &snapshot.reported {
        listeners
            .with_label_values(&[mount.as_str()])
            .set(*reported as i64);
    }

    let mut buffer = String::new();
    TextEncoder::new().encode_utf8(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}
