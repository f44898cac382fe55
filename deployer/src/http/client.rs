//! HTTP client implementation

use std::time::Duration;

use cf_api_models::ErrorResponse;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::settings::EndpointSettings;

/// HTTP client for the login and API endpoints
pub struct HttpClient {
    client: Client,
    login_url: String,
    api_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(endpoints: &EndpointSettings, timeout: Duration) -> Result<Self, DeployError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            login_url: endpoints.login.base_url(),
            api_url: endpoints.api.base_url(),
        })
    }

    /// Base URL of the authentication endpoint
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Base URL of the API endpoint
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn raw(&self) -> &Client {
        &self.client
    }

    /// Start an authorized API request
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        debug!("{} {}", method, url);

        self.client
            .request(method, &url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, credential.authorization())
    }

    /// Make a GET request
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        step: &str,
        path: &str,
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> Result<T, DeployError> {
        let request = self.request(Method::GET, path, credential).query(query);
        self.send(step, request).await
    }

    /// Make a POST request with a JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        step: &str,
        path: &str,
        query: &[(&str, &str)],
        credential: &Credential,
        body: &B,
    ) -> Result<T, DeployError> {
        let request = self
            .request(Method::POST, path, credential)
            .query(query)
            .json(body);
        self.send(step, request).await
    }

    /// Make a PUT request with a JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        step: &str,
        path: &str,
        query: &[(&str, &str)],
        credential: &Credential,
        body: &B,
    ) -> Result<T, DeployError> {
        let request = self
            .request(Method::PUT, path, credential)
            .query(query)
            .json(body);
        self.send(step, request).await
    }

    /// Make a DELETE request, ignoring any response body
    pub(crate) async fn delete(
        &self,
        step: &str,
        path: &str,
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> Result<StatusCode, DeployError> {
        let request = self.request(Method::DELETE, path, credential).query(query);
        let response = check_status(step, request.send().await?).await?;
        Ok(response.status())
    }

    /// Send a request and decode a successful JSON response
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        step: &str,
        request: RequestBuilder,
    ) -> Result<T, DeployError> {
        let response = check_status(step, request.send().await?).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DeployError::UnexpectedResponse {
            step: step.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Map error statuses: 401 is an authorization failure, anything else >= 400
/// carries the platform's `description` when it sent one.
pub(crate) async fn check_status(step: &str, response: Response) -> Result<Response, DeployError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        error!("{} rejected the credential", step);
        return Err(DeployError::AuthError(format!("{}: Authorization error", step)));
    }

    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        error!("{} failed: {} - {}", step, status, body);
        let description = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.description)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(DeployError::Platform {
            step: step.to_string(),
            description,
        });
    }

    Ok(response)
}

/// Guid from a resource body, or an unexpected-response error naming `step`
pub(crate) fn require_guid(step: &str, guid: Option<String>) -> Result<String, DeployError> {
    guid.ok_or_else(|| DeployError::UnexpectedResponse {
        step: step.to_string(),
        reason: "missing metadata.guid".to_string(),
    })
}
