//! Differential upload and the two completion waits

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::archive::{Package, ResourceEntry, ResourceManifest};
use crate::authn::credential::Credential;
use crate::deploy::poller::{poll, PollOptions};
use crate::errors::DeployError;
use crate::platform::{stable_address, PlatformApi};

/// Ask the platform which manifest entries it already holds
pub async fn match_resources(
    platform: &dyn PlatformApi,
    credential: &Credential,
    manifest: &ResourceManifest,
) -> Result<Vec<ResourceEntry>, DeployError> {
    let matched = platform
        .match_resources(credential, manifest.entries())
        .await?;

    let unknown = matched
        .iter()
        .filter(|m| manifest.get(&m.path) != Some(*m))
        .count();
    if unknown > 0 {
        warn!("Platform matched {} resources not in the manifest", unknown);
    }
    info!(
        "Platform already caches {} of {} resources",
        matched.len(),
        manifest.len()
    );
    Ok(matched)
}

/// Upload the package and return the ingestion job guid
pub async fn upload(
    platform: &dyn PlatformApi,
    credential: &Credential,
    app_guid: &str,
    package: &Package,
    matched: &[ResourceEntry],
) -> Result<String, DeployError> {
    let job_guid = platform
        .upload_bits(credential, app_guid, package, matched)
        .await?;
    info!("Upload accepted, job {}", job_guid);
    Ok(job_guid)
}

/// Wait until the upload job reports completion
pub async fn await_job<S, SF>(
    platform: &dyn PlatformApi,
    credential: &Credential,
    job_guid: &str,
    options: &PollOptions,
    sleep_fn: S,
) -> Result<(), DeployError>
where
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    poll(
        "upload job completion",
        options,
        move || async move {
            let status = platform.job_status(credential, job_guid).await?;
            debug!("Job {} reports {:?}", job_guid, status);
            Ok(status.is_complete().then_some(()))
        },
        sleep_fn,
    )
    .await
}

/// Wait until every instance runs and one exposes an address; returns that address
pub async fn await_running<S, SF>(
    platform: &dyn PlatformApi,
    credential: &Credential,
    app_guid: &str,
    options: &PollOptions,
    sleep_fn: S,
) -> Result<String, DeployError>
where
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    poll(
        "all instances running",
        options,
        move || async move {
            let instances = platform.app_instances(credential, app_guid).await?;
            let running = instances.iter().filter(|i| i.is_running()).count();
            debug!("{}/{} instances running", running, instances.len());
            Ok(stable_address(&instances))
        },
        sleep_fn,
    )
    .await
}
