//! Token endpoint

use base64::{engine::general_purpose::STANDARD, Engine};
use cf_api_models::TokenResponse;
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::HttpClient;

/// OAuth client id used for password grants, sent with an empty secret
const OAUTH_CLIENT_ID: &str = "cf";

impl HttpClient {
    /// Password-grant login. Every failure mode surfaces as an authorization error.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Credential, DeployError> {
        let url = format!("{}/oauth/token", self.login_url());
        debug!("POST {} (login)", url);

        let client_auth = STANDARD.encode(format!("{}:", OAUTH_CLIENT_ID));
        let response = self
            .raw()
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("Basic {}", client_auth))
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| DeployError::AuthError(format!("login: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeployError::AuthError(format!("login: {}", e)))?;

        if !status.is_success() {
            error!("Login failed: {}", status);
            return Err(DeployError::AuthError(format!("login: {}", status)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| DeployError::AuthError("login: malformed token response".to_string()))?;

        match (token.token_type, token.access_token) {
            (Some(token_type), Some(access_token)) if !access_token.is_empty() => {
                Ok(Credential::new(token_type, access_token))
            }
            _ => Err(DeployError::AuthError(
                "login: token response is missing token_type or access_token".to_string(),
            )),
        }
    }
}
