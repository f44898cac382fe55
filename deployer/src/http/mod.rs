//! Control plane HTTP client

pub mod apps;
pub mod auth;
pub mod bits;
pub mod client;
pub mod domains;
pub mod platform;
pub mod routes;
