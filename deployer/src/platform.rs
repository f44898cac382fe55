//! Platform API seam
//!
//! Every remote call the deployer makes goes through [`PlatformApi`]. The
//! reqwest-backed [`HttpClient`](crate::http::client::HttpClient) talks to a
//! real control plane; tests substitute an in-memory platform.

use std::fmt;

use async_trait::async_trait;
use cf_api_models::{AppRequest, RouteRequest};
use secrecy::SecretString;

use crate::archive::{Package, ResourceEntry};
use crate::authn::credential::Credential;
use crate::errors::DeployError;

/// Job guid the platform reports once an upload job has finished
pub const JOB_COMPLETE_SENTINEL: &str = "0";

/// Desired application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Started,
    Stopped,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Started => "STARTED",
            AppState::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an upload job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    /// Guid reported in the job's metadata
    pub guid: String,

    /// Status string, when the platform provides one
    pub status: Option<String>,
}

impl JobStatus {
    /// The platform signals completion by reporting the sentinel guid, not via `status`
    pub fn is_complete(&self) -> bool {
        self.guid == JOB_COMPLETE_SENTINEL
    }
}

/// Runtime state of one application instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStatus {
    pub index: u32,
    pub state: String,
    pub uris: Vec<String>,
}

impl InstanceStatus {
    pub fn is_running(&self) -> bool {
        self.state == "RUNNING"
    }
}

/// Reachable address once every instance runs; `None` while the app is not stable.
///
/// Instances must be ordered by index. At least one instance has to be reported and
/// at least one has to expose a URI.
pub fn stable_address(instances: &[InstanceStatus]) -> Option<String> {
    if instances.is_empty() || !instances.iter().all(InstanceStatus::is_running) {
        return None;
    }
    instances.iter().find_map(|i| i.uris.first().cloned())
}

/// Operations the deployer needs from the control plane
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Exchange a username/password pair for a bearer credential
    async fn login(&self, username: &str, password: &SecretString) -> Result<Credential, DeployError>;

    /// First app named `name` in `space_guid`
    async fn find_app(
        &self,
        credential: &Credential,
        space_guid: &str,
        name: &str,
    ) -> Result<Option<String>, DeployError>;

    /// Create an app, returning its guid
    async fn create_app(&self, credential: &Credential, request: &AppRequest) -> Result<String, DeployError>;

    /// Update an existing app, returning its guid
    async fn update_app(
        &self,
        credential: &Credential,
        app_guid: &str,
        request: &AppRequest,
    ) -> Result<String, DeployError>;

    /// Transition an app to `state`
    async fn set_app_state(
        &self,
        credential: &Credential,
        app_guid: &str,
        state: AppState,
    ) -> Result<(), DeployError>;

    /// Private domains visible to an organization
    async fn private_domains(&self, credential: &Credential, org_guid: &str) -> Result<Vec<String>, DeployError>;

    /// Shared domains, in platform order
    async fn shared_domains(&self, credential: &Credential) -> Result<Vec<String>, DeployError>;

    /// First route with `host` on `domain_guid`
    async fn find_route(
        &self,
        credential: &Credential,
        host: &str,
        domain_guid: &str,
    ) -> Result<Option<String>, DeployError>;

    /// Create a route, returning its guid
    async fn create_route(&self, credential: &Credential, request: &RouteRequest) -> Result<String, DeployError>;

    /// Bind a route to an app. Binding an already-bound route succeeds.
    async fn bind_route(&self, credential: &Credential, app_guid: &str, route_guid: &str) -> Result<(), DeployError>;

    /// Subset of `resources` whose content the platform already holds
    async fn match_resources(
        &self,
        credential: &Credential,
        resources: &[ResourceEntry],
    ) -> Result<Vec<ResourceEntry>, DeployError>;

    /// Upload the package with the matched-resource list, returning the ingestion job guid
    async fn upload_bits(
        &self,
        credential: &Credential,
        app_guid: &str,
        package: &Package,
        matched: &[ResourceEntry],
    ) -> Result<String, DeployError>;

    async fn job_status(&self, credential: &Credential, job_guid: &str) -> Result<JobStatus, DeployError>;

    /// Per-instance runtime state, ordered by instance index
    async fn app_instances(&self, credential: &Credential, app_guid: &str) -> Result<Vec<InstanceStatus>, DeployError>;

    /// Delete an app together with its bound resources
    async fn delete_app(&self, credential: &Credential, app_guid: &str) -> Result<(), DeployError>;
}
