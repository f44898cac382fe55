//! Deployment orchestration
//!
//! Install converges the app, domain and route, uploads only what the
//! platform does not already cache, then waits for the upload job and for
//! every instance to run. Uninstall looks the app up and deletes it.

pub mod context;
pub mod converge;
pub mod params;
pub mod pipeline;
pub mod poller;
pub mod stage;
pub mod upload;

pub use params::{AppTarget, InstallParams, UninstallParams};
pub use pipeline::{DeployOptions, Deployer};
pub use poller::PollOptions;
