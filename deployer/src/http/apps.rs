//! Application endpoints

use cf_api_models::{AppRequest, AppStateRequest, AppStats, Page, Resource};
use tracing::warn;

use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::{require_guid, HttpClient};
use crate::platform::{AppState, InstanceStatus};

impl HttpClient {
    /// Look up an app by name within a space
    pub async fn find_app(
        &self,
        credential: &Credential,
        space_guid: &str,
        name: &str,
    ) -> Result<Option<String>, DeployError> {
        let path = format!("/v2/spaces/{}/apps", space_guid);
        let filter = format!("name:{}", name);
        let page: Page = self
            .get(
                "check_app",
                &path,
                &[("q", filter.as_str()), ("inline-relations-depth", "1")],
                credential,
            )
            .await?;

        if page.total_results.is_none() {
            return Err(DeployError::UnexpectedResponse {
                step: "check_app".to_string(),
                reason: "missing total_results".to_string(),
            });
        }
        if page.resources.len() > 1 {
            warn!("{} apps named {} found, using the first", page.resources.len(), name);
        }
        Ok(page.first_guid().map(str::to_string))
    }

    /// Create an app
    pub async fn create_app(
        &self,
        credential: &Credential,
        request: &AppRequest,
    ) -> Result<String, DeployError> {
        let body: Resource = self
            .post("create_app", "/v2/apps", &[("async", "true")], credential, request)
            .await?;
        require_guid("create_app", body.metadata.guid)
    }

    /// Update an existing app
    pub async fn update_app(
        &self,
        credential: &Credential,
        app_guid: &str,
        request: &AppRequest,
    ) -> Result<String, DeployError> {
        let path = format!("/v2/apps/{}", app_guid);
        let body: Resource = self
            .put("update_app", &path, &[("async", "true")], credential, request)
            .await?;
        require_guid("update_app", body.metadata.guid)
    }

    /// Request an app state transition
    pub async fn set_app_state(
        &self,
        credential: &Credential,
        app_guid: &str,
        state: AppState,
    ) -> Result<(), DeployError> {
        let path = format!("/v2/apps/{}", app_guid);
        let request = AppStateRequest {
            state: state.as_str().to_string(),
        };
        let body: Resource = self
            .put(
                "change_app_state",
                &path,
                &[("async", "true"), ("inline-relations-depth", "1")],
                credential,
                &request,
            )
            .await?;

        match body.guid() {
            Some(guid) if guid == app_guid => Ok(()),
            other => Err(DeployError::UnexpectedResponse {
                step: "change_app_state".to_string(),
                reason: format!("expected app {}, got {:?}", app_guid, other),
            }),
        }
    }

    /// Per-instance runtime stats, ordered by instance index
    pub async fn app_instances(
        &self,
        credential: &Credential,
        app_guid: &str,
    ) -> Result<Vec<InstanceStatus>, DeployError> {
        let path = format!("/v2/apps/{}/stats", app_guid);
        let stats: AppStats = self.get("app_stats", &path, &[], credential).await?;

        let mut instances: Vec<InstanceStatus> = stats
            .into_iter()
            .filter_map(|(index, instance)| {
                let index = index.parse::<u32>().ok()?;
                Some(InstanceStatus {
                    index,
                    state: instance.state,
                    uris: instance.stats.map(|s| s.uris).unwrap_or_default(),
                })
            })
            .collect();
        instances.sort_by_key(|i| i.index);
        Ok(instances)
    }

    /// Delete an app and everything bound to it
    pub async fn delete_app(&self, credential: &Credential, app_guid: &str) -> Result<(), DeployError> {
        let path = format!("/v2/apps/{}", app_guid);
        self.delete(
            "delete_app",
            &path,
            &[("async", "true"), ("recursive", "true")],
            credential,
        )
        .await?;
        Ok(())
    }
}
