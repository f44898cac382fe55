//! Cloud Foundry v2 API wire models
//!
//! Request and response bodies exchanged with the login (UAA) and API
//! (Cloud Controller) endpoints. Only the fields the deployer reads or
//! writes are modelled; unknown fields are ignored on deserialization.

pub mod models;

pub use models::*;
