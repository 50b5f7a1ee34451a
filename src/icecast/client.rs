//! HTTP client for the Icecast admin API

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::models::{IceStats, MountListeners};
use super::trait_def::{IcecastApi, UpstreamError, UpstreamResult};
use crate::config::Config;

pub struct IcecastClient {
    http: Client,
    base_url: String,
    user: String,
    password: String,
}

impl IcecastClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.url.trim_end_matches('/').to_string();
        // Fail at startup rather than on every request
        Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("Invalid upstream url '{}': {}", base_url, e))?;

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> UpstreamResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))
    }

    async fn get(&self, url: Url) -> UpstreamResult<IceStats> {
        debug!(%url, "querying icecast admin api");

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = resp.text().await?;
        Ok(IceStats::parse(&body)?)
    }
}

#[async_trait]
impl IcecastApi for IcecastClient {
    async fn list_mounts(&self) -> UpstreamResult<Vec<String>> {
        let url = self.endpoint("/admin/listmounts")?;
        Ok(self.get(url).await?.into_mounts())
    }

    async fn list_clients(&self, mount: &str) -> UpstreamResult<MountListeners> {
        let mut url = self.endpoint("/admin/listclients")?;
        url.query_pairs_mut().append_pair("mount", mount);
        Ok(self.get(url).await?.into_mount_listeners(mount))
    }
}
