//! Icecast admin API access

pub mod client;
pub mod models;
pub mod trait_def;

pub use client::IcecastClient;
pub use models::{Listener, MountListeners};
pub use trait_def::{IcecastApi, UpstreamError, UpstreamResult};
