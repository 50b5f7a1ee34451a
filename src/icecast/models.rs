//! Icecast admin API response schema
//!
//! Both `/admin/listmounts` and `/admin/listclients` answer with an
//! `<icestats>` document holding one `<source>` element per mount.

use serde::{Deserialize, Deserializer};

/// One connected client as reported by `/admin/listclients`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Listener {
    #[serde(rename = "IP")]
    pub ip: String,

    #[serde(rename = "UserAgent")]
    pub user_agent: String,

    /// Seconds since the client connected, 0 when the server reports
    /// something other than a number
    #[serde(rename = "Connected", deserialize_with = "lenient_seconds")]
    pub connected: u64,

    /// Server-side session ID
    #[serde(rename = "ID")]
    pub id: String,
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0))
}

/// Listener list of a single mount
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountListeners {
    pub mount: String,

    /// Listener count as reported by the server, which may include clients
    /// the listener list leaves out
    pub reported: u64,

    pub listeners: Vec<Listener>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "icestats")]
pub(crate) struct IceStats {
    #[serde(rename = "source", default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Source {
    #[serde(rename = "@mount")]
    pub mount: String,

    // listclients uses `Listeners`, listmounts uses `listeners`
    #[serde(rename = "Listeners", alias = "listeners", default)]
    pub listener_count: Option<u64>,

    #[serde(rename = "listener", default)]
    pub listeners: Vec<Listener>,
}

impl IceStats {
    pub(crate) fn parse(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    pub(crate) fn into_mounts(self) -> Vec<String> {
        self.sources.into_iter().map(|s| s.mount).collect()
    }

    /// Listener list for `mount`. Only the first `<source>` is considered;
    /// a document without one means nobody is listening.
    pub(crate) fn into_mount_listeners(self, mount: &str) -> MountListeners {
        match self.sources.into_iter().next() {
            Some(source) => MountListeners {
                mount: mount.to_string(),
                reported: source
                    .listener_count
                    .unwrap_or(source.listeners.len() as u64),
                listeners: source.listeners,
            },
            None => MountListeners {
                mount: mount.to_string(),
                ..Default::default()
            },
        }
    }
}
