//! Domain endpoints

use cf_api_models::Page;

use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Private domains reachable from an organization
    pub async fn private_domains(
        &self,
        credential: &Credential,
        org_guid: &str,
    ) -> Result<Vec<String>, DeployError> {
        let path = format!("/v2/organizations/{}/private_domains", org_guid);
        let page: Page = self.get("check_private_domain", &path, &[], credential).await?;
        Ok(page.guids())
    }

    /// Shared domains, in platform order
    pub async fn shared_domains(&self, credential: &Credential) -> Result<Vec<String>, DeployError> {
        let page: Page = self
            .get("check_shared_domain", "/v2/shared_domains", &[], credential)
            .await?;
        Ok(page.guids())
    }
}
