pub mod api;
pub mod config;
pub mod geoip;
pub mod icecast;
pub mod stats;
