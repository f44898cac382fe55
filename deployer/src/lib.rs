//! cf-deployer library
//!
//! Deploys a zipped application to a Cloud Foundry style control plane:
//! converges the app, domain and route, uploads only the bytes the platform
//! does not already cache, and waits until every instance runs.

pub mod app;
pub mod archive;
pub mod authn;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod platform;
pub mod settings;
pub mod utils;
