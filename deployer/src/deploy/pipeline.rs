//! Install and uninstall pipelines

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::archive::descriptor::app_request;
use crate::archive::inspect;
use crate::deploy::context::{RemoteIdentifiers, RunContext};
use crate::deploy::converge::{converge_app, converge_domain, converge_route};
use crate::deploy::params::{InstallParams, UninstallParams};
use crate::deploy::poller::PollOptions;
use crate::deploy::stage::Stage;
use crate::deploy::upload::{await_job, await_running, match_resources, upload};
use crate::errors::DeployError;
use crate::platform::{AppState, PlatformApi};
use crate::settings::Settings;

/// Pipeline tuning
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Wait for the upload job
    pub job_poll: PollOptions,

    /// Wait for all instances to run
    pub running_poll: PollOptions,

    /// Timeout for fetching a remote package
    pub package_timeout: Duration,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            job_poll: PollOptions::default(),
            running_poll: PollOptions::default(),
            package_timeout: Duration::from_secs(300),
        }
    }
}

impl From<&Settings> for DeployOptions {
    fn from(settings: &Settings) -> Self {
        let poll = PollOptions::from(&settings.polling);
        Self {
            job_poll: poll,
            running_poll: poll,
            ..Default::default()
        }
    }
}

/// What a successful install produced
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Reachable address of the running app
    pub address: String,

    pub ids: RemoteIdentifiers,

    /// `true` when the app existed before this run
    pub app_reused: bool,

    /// `true` when the route existed before this run
    pub route_reused: bool,

    /// Files in the package
    pub resources: usize,

    /// Files the platform already held
    pub cached_resources: usize,
}

/// Runs install and uninstall against one platform
pub struct Deployer {
    platform: Arc<dyn PlatformApi>,
    options: DeployOptions,
}

impl Deployer {
    pub fn new(platform: Arc<dyn PlatformApi>, options: DeployOptions) -> Self {
        Self { platform, options }
    }

    /// Deploy the package and wait until the app runs. Stops at the first failing step.
    ///
    /// Nothing is rolled back on failure; a later install or uninstall cleans up.
    pub async fn install(&self, params: &InstallParams) -> Result<InstallReport, DeployError> {
        let mut ctx = RunContext::new();
        let platform = self.platform.as_ref();
        let target = &params.target;
        info!("Installing {} into space {}", target.app_name, target.space_guid);

        step(Stage::ValidateParams, async { params.validate() }).await?;

        let package = step(
            Stage::BuildManifest,
            params.package.fetch(self.options.package_timeout),
        )
        .await?;
        let inspection = step(Stage::BuildManifest, async { inspect(&package.bytes) }).await?;
        let manifest = inspection.manifest;

        let credential = step(
            Stage::AcquireSession,
            ctx.session.acquire(platform, &params.credentials),
        )
        .await?;

        let request = app_request(
            &target.app_name,
            &target.space_guid,
            inspection.descriptor.as_ref(),
            &params.overrides,
        );
        let app = step(
            Stage::ConvergeApp,
            converge_app(platform, &credential, target, &request),
        )
        .await?;
        ctx.ids.app_guid = Some(app.guid.clone());

        let domain_guid = step(
            Stage::ConvergeDomain,
            converge_domain(platform, &credential, &params.org_guid),
        )
        .await?;
        ctx.ids.domain_guid = Some(domain_guid.clone());

        let route = step(
            Stage::ConvergeRoute,
            converge_route(platform, &credential, target, &domain_guid),
        )
        .await?;
        ctx.ids.route_guid = Some(route.guid.clone());

        step(
            Stage::BindRoute,
            platform.bind_route(&credential, &app.guid, &route.guid),
        )
        .await?;

        let matched = step(
            Stage::MatchResources,
            match_resources(platform, &credential, &manifest),
        )
        .await?;

        let job_guid = step(
            Stage::UploadBits,
            upload(platform, &credential, &app.guid, &package, &matched),
        )
        .await?;
        ctx.ids.job_guid = Some(job_guid.clone());

        step(
            Stage::AwaitJob,
            await_job(
                platform,
                &credential,
                &job_guid,
                &self.options.job_poll,
                tokio::time::sleep,
            ),
        )
        .await?;

        step(
            Stage::StartApp,
            platform.set_app_state(&credential, &app.guid, AppState::Started),
        )
        .await?;

        let address = step(
            Stage::AwaitRunning,
            await_running(
                platform,
                &credential,
                &app.guid,
                &self.options.running_poll,
                tokio::time::sleep,
            ),
        )
        .await?;

        info!("{} is running at {}", target.app_name, address);
        Ok(InstallReport {
            address,
            ids: ctx.ids,
            app_reused: app.reused,
            route_reused: route.reused,
            resources: manifest.len(),
            cached_resources: matched.len(),
        })
    }

    /// Delete the app and its bound resources. Succeeds without doing anything
    /// when the app does not exist.
    pub async fn uninstall(&self, params: &UninstallParams) -> Result<bool, DeployError> {
        let mut ctx = RunContext::new();
        let platform = self.platform.as_ref();
        let target = &params.target;
        info!("Uninstalling {} from space {}", target.app_name, target.space_guid);

        step(Stage::ValidateParams, async { params.validate() }).await?;

        let credential = step(
            Stage::AcquireSession,
            ctx.session.acquire(platform, &params.credentials),
        )
        .await?;

        let found = step(
            Stage::LookupApp,
            platform.find_app(&credential, &target.space_guid, &target.app_name),
        )
        .await?;

        let Some(app_guid) = found else {
            info!("App {} not found, nothing to delete", target.app_name);
            return Ok(true);
        };
        ctx.ids.app_guid = Some(app_guid.clone());

        step(Stage::DeleteApp, platform.delete_app(&credential, &app_guid)).await?;
        info!("Deleted app {} ({})", target.app_name, app_guid);
        Ok(true)
    }
}

/// Run one pipeline step, tagging its error with the step
async fn step<T, F>(stage: Stage, fut: F) -> Result<T, DeployError>
where
    F: Future<Output = Result<T, DeployError>>,
{
    info!(stage = %stage, "Running step");
    fut.await.map_err(|source| {
        error!(stage = %stage, "Step failed: {}", source);
        DeployError::Failed {
            step: stage,
            source: Box::new(source),
        }
    })
}
