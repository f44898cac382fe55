//! Resource matching, bits upload and job status

use cf_api_models::{JobEntity, Resource};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::info;

use crate::archive::{Package, ResourceEntry};
use crate::authn::credential::Credential;
use crate::errors::DeployError;
use crate::http::client::{require_guid, HttpClient};
use crate::platform::JobStatus;

impl HttpClient {
    /// Ask which manifest entries the platform already caches
    pub async fn match_resources(
        &self,
        credential: &Credential,
        resources: &[ResourceEntry],
    ) -> Result<Vec<ResourceEntry>, DeployError> {
        self.put("match_resources", "/v2/resource_match", &[], credential, &resources)
            .await
    }

    /// Upload the package as a multipart body. Returns the ingestion job guid.
    pub async fn upload_bits(
        &self,
        credential: &Credential,
        app_guid: &str,
        package: &Package,
        matched: &[ResourceEntry],
    ) -> Result<String, DeployError> {
        let path = format!("/v2/apps/{}/bits", app_guid);
        let resources = serde_json::to_string(matched)?;

        let application = Part::bytes(package.bytes.clone())
            .file_name(package.file_name.clone())
            .mime_str("application/zip")?;
        let form = Form::new()
            .text("async", "true")
            .text("resources", resources)
            .part("application", application);

        info!(
            "Uploading {} ({} bytes, {} resources already cached)",
            package.file_name,
            package.len(),
            matched.len()
        );

        let request = self
            .request(Method::PUT, &path, credential)
            .query(&[("async", "true")])
            .multipart(form);
        let body: Resource = self.send("upload_bits", request).await?;
        require_guid("upload_bits", body.metadata.guid)
    }

    /// Current state of an asynchronous job
    pub async fn job_status(
        &self,
        credential: &Credential,
        job_guid: &str,
    ) -> Result<JobStatus, DeployError> {
        let path = format!("/v2/jobs/{}", job_guid);
        let body: Resource<JobEntity> = self.get("check_job", &path, &[], credential).await?;
        let guid = require_guid("check_job", body.metadata.guid)?;

        Ok(JobStatus {
            guid,
            status: body.entity.and_then(|e| e.status),
        })
    }
}
