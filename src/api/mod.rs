//! HTTP endpoints

pub mod handlers;
pub mod metrics;
pub mod routes;

pub use routes::create_router;
