use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use ::config::{Environment, File, FileFormat};
use serde::Deserialize;

/// Upstream connection settings and the mounts to report on.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(alias = "User")]
    pub user: String,
    #[serde(alias = "Password")]
    pub password: String,
    /// Base URL of the Icecast server, e.g. `http://localhost:8000`
    #[serde(alias = "URL", alias = "Url")]
    pub url: String,
    /// Mounts to query. When empty, mounts are discovered through
    /// `/admin/listmounts` on every request.
    #[serde(default, alias = "Mounts")]
    pub mounts: Vec<String>,
    /// Path to a MaxMind GeoIP2/GeoLite2 City database
    #[serde(default = "Config::default_geoip_db", alias = "GeoipDb")]
    pub geoip_db: String,
    #[serde(default = "Config::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    fn default_geoip_db() -> String {
        "GeoIP2-City.mmdb".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        5
    }

    /// Load configuration from a TOML file, with `ICESTATS_*` environment
    /// variables (and a `.env` file) taking precedence over file values.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_with_env(path.as_ref(), Self::environment())
    }

    /// `ICESTATS_*` variables; `ICESTATS_MOUNTS` is a comma-separated list
    pub fn environment() -> Environment {
        Environment::with_prefix("ICESTATS")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("mounts")
    }

    /// Load configuration from a TOML file layered under the given
    /// environment source.
    pub fn load_with_env(path: &Path, env: Environment) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = settings
            .try_deserialize()
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        config.url = config.url.trim_end_matches('/').to_string();
        if config.url.is_empty() {
            anyhow::bail!("url must not be empty in {}", path.display());
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
