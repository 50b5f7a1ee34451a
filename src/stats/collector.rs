//! Per-request collection pipeline
//!
//! Fetches the listener list of every mount, resolves each listener's
//! location and returns the result as a [`Snapshot`]. Failures are never
//! propagated: a mount that cannot be queried is skipped and a listener
//! that cannot be resolved is dropped.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::geoip::GeoLookup;
use crate::icecast::IcecastApi;
use crate::stats::models::{ResolvedListener, Snapshot};

#[derive(Clone)]
pub struct Collector {
    api: Arc<dyn IcecastApi>,
    geo: Arc<dyn GeoLookup>,
    mounts: Vec<String>,
}

impl Collector {
    /// `mounts` restricts collection to the given mounts; pass an empty
    /// list to query every mount the server reports.
    pub fn new(api: Arc<dyn IcecastApi>, geo: Arc<dyn GeoLookup>, mounts: Vec<String>) -> Self {
        Self { api, geo, mounts }
    }

    async fn mounts(&self) -> Vec<String> {
        if !self.mounts.is_empty() {
            return self.mounts.clone();
        }

        match self.api.list_mounts().await {
            Ok(mounts) => mounts,
            Err(e) => {
                warn!(error = %e, "failed to list mounts");
                Vec::new()
            }
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        for mount in self.mounts().await {
            let clients = match self.api.list_clients(&mount).await {
                Ok(clients) => clients,
                Err(e) => {
                    warn!(mount = %mount, error = %e, "skipping mount");
                    continue;
                }
            };

            snapshot.reported.insert(mount.clone(), clients.reported);

            for listener in clients.listeners {
                match self.geo.locate_str(&listener.ip) {
                    Ok(location) => snapshot.listeners.push(ResolvedListener {
                        mount: mount.clone(),
                        listener,
                        location,
                    }),
                    Err(e) => {
                        debug!(mount = %mount, ip = %listener.ip, error = %e, "dropping listener");
                    }
                }
            }
        }

        snapshot
    }
}
