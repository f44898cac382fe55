//! [`PlatformApi`] over HTTP

use async_trait::async_trait;
use cf_api_models::{AppRequest, RouteRequest};
use secrecy::SecretString;

use crate::archive::{Package, ResourceEntry};
use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::HttpClient;
use crate::platform::{AppState, InstanceStatus, JobStatus, PlatformApi};

#[async_trait]
impl PlatformApi for HttpClient {
    async fn login(&self, username: &str, password: &SecretString) -> Result<Credential, DeployError> {
        HttpClient::login(self, username, password).await
    }

    async fn find_app(
        &self,
        credential: &Credential,
        space_guid: &str,
        name: &str,
    ) -> Result<Option<String>, DeployError> {
        HttpClient::find_app(self, credential, space_guid, name).await
    }

    async fn create_app(&self, credential: &Credential, request: &AppRequest) -> Result<String, DeployError> {
        HttpClient::create_app(self, credential, request).await
    }

    async fn update_app(
        &self,
        credential: &Credential,
        app_guid: &str,
        request: &AppRequest,
    ) -> Result<String, DeployError> {
        HttpClient::update_app(self, credential, app_guid, request).await
    }

    async fn set_app_state(
        &self,
        credential: &Credential,
        app_guid: &str,
        state: AppState,
    ) -> Result<(), DeployError> {
        HttpClient::set_app_state(self, credential, app_guid, state).await
    }

    async fn private_domains(&self, credential: &Credential, org_guid: &str) -> Result<Vec<String>, DeployError> {
        HttpClient::private_domains(self, credential, org_guid).await
    }

    async fn shared_domains(&self, credential: &Credential) -> Result<Vec<String>, DeployError> {
        HttpClient::shared_domains(self, credential).await
    }

    async fn find_route(
        &self,
        credential: &Credential,
        host: &str,
        domain_guid: &str,
    ) -> Result<Option<String>, DeployError> {
        HttpClient::find_route(self, credential, host, domain_guid).await
    }

    async fn create_route(&self, credential: &Credential, request: &RouteRequest) -> Result<String, DeployError> {
        HttpClient::create_route(self, credential, request).await
    }

    async fn bind_route(&self, credential: &Credential, app_guid: &str, route_guid: &str) -> Result<(), DeployError> {
        HttpClient::bind_route(self, credential, app_guid, route_guid).await
    }

    async fn match_resources(
        &self,
        credential: &Credential,
        resources: &[ResourceEntry],
    ) -> Result<Vec<ResourceEntry>, DeployError> {
        HttpClient::match_resources(self, credential, resources).await
    }

    async fn upload_bits(
        &self,
        credential: &Credential,
        app_guid: &str,
        package: &Package,
        matched: &[ResourceEntry],
    ) -> Result<String, DeployError> {
        HttpClient::upload_bits(self, credential, app_guid, package, matched).await
    }

    async fn job_status(&self, credential: &Credential, job_guid: &str) -> Result<JobStatus, DeployError> {
        HttpClient::job_status(self, credential, job_guid).await
    }

    async fn app_instances(&self, credential: &Credential, app_guid: &str) -> Result<Vec<InstanceStatus>, DeployError> {
        HttpClient::app_instances(self, credential, app_guid).await
    }

    async fn delete_app(&self, credential: &Credential, app_guid: &str) -> Result<(), DeployError> {
        HttpClient::delete_app(self, credential, app_guid).await
    }
}
