//! Route endpoints

use cf_api_models::{Page, Resource, RouteRequest};
use reqwest::Method;
use tracing::warn;

use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::{require_guid, HttpClient};

impl HttpClient {
    /// Look up a route by host and domain
    pub async fn find_route(
        &self,
        credential: &Credential,
        host: &str,
        domain_guid: &str,
    ) -> Result<Option<String>, DeployError> {
        let filter = format!("host:{};domain_guid:{}", host, domain_guid);
        let page: Page = self
            .get(
                "check_route",
                "/v2/routes",
                &[("q", filter.as_str()), ("inline-relations-depth", "1")],
                credential,
            )
            .await?;

        if page.resources.len() > 1 {
            warn!("{} routes match host {}, using the first", page.resources.len(), host);
        }
        Ok(page.first_guid().map(str::to_string))
    }

    /// Create a route
    pub async fn create_route(
        &self,
        credential: &Credential,
        request: &RouteRequest,
    ) -> Result<String, DeployError> {
        let body: Resource = self
            .post(
                "create_route",
                "/v2/routes",
                &[("async", "true"), ("inline-relations-depth", "1")],
                credential,
                request,
            )
            .await?;
        require_guid("create_route", body.metadata.guid)
    }

    /// Bind a route to an app. The platform answers with the app resource.
    pub async fn bind_route(
        &self,
        credential: &Credential,
        app_guid: &str,
        route_guid: &str,
    ) -> Result<(), DeployError> {
        let path = format!("/v2/apps/{}/routes/{}", app_guid, route_guid);
        let request = self.request(Method::PUT, &path, credential);
        let body: Resource = self.send("bind_route", request).await?;

        match body.guid() {
            Some(guid) if guid == app_guid => Ok(()),
            other => Err(DeployError::UnexpectedResponse {
                step: "bind_route".to_string(),
                reason: format!("expected app {}, got {:?}", app_guid, other),
            }),
        }
    }
}
