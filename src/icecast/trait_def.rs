use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use super::models::MountListeners;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed upstream response: {0}")]
    Xml(#[from] quick_xml::DeError),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[async_trait]
pub trait IcecastApi: Send + Sync {
    /// Names of all mounts currently active on the server
    async fn list_mounts(&self) -> UpstreamResult<Vec<String>>;

    /// Listeners connected to `mount`
    async fn list_clients(&self, mount: &str) -> UpstreamResult<MountListeners>;
}
