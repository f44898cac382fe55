//! Idempotent convergence of app, domain and route
//!
//! Each step looks the object up first and only creates it when the lookup
//! comes back empty, so repeated installs never duplicate anything. When a
//! lookup returns several matches the first one is used.

use cf_api_models::{AppRequest, RouteRequest};
use tracing::{info, warn};

use crate::authn::credential::Credential;
use crate::deploy::params::AppTarget;
use crate::errors::DeployError;
use crate::platform::{AppState, PlatformApi};

/// Outcome of converging a remote object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converged {
    pub guid: String,

    /// `true` when the object already existed and was reused
    pub reused: bool,
}

/// Make sure the app exists with the requested attributes.
///
/// An existing app is stopped first (a running app cannot take a new upload)
/// and then updated; a missing one is created.
pub async fn converge_app(
    platform: &dyn PlatformApi,
    credential: &Credential,
    target: &AppTarget,
    request: &AppRequest,
) -> Result<Converged, DeployError> {
    match platform
        .find_app(credential, &target.space_guid, &target.app_name)
        .await?
    {
        Some(guid) => {
            info!("App {} exists ({}), stopping it", target.app_name, guid);
            platform
                .set_app_state(credential, &guid, AppState::Stopped)
                .await?;
            let guid = platform.update_app(credential, &guid, request).await?;
            Ok(Converged { guid, reused: true })
        }
        None => {
            info!("Creating app {}", target.app_name);
            let guid = platform.create_app(credential, request).await?;
            Ok(Converged {
                guid,
                reused: false,
            })
        }
    }
}

/// Pick the domain for the app's route: the organization's private domain when
/// exactly one exists, otherwise the first shared domain.
pub async fn converge_domain(
    platform: &dyn PlatformApi,
    credential: &Credential,
    org_guid: &str,
) -> Result<String, DeployError> {
    let private = platform.private_domains(credential, org_guid).await?;
    if let [domain] = private.as_slice() {
        info!("Using private domain {}", domain);
        return Ok(domain.clone());
    }
    if private.len() > 1 {
        warn!(
            "{} private domains in org {}, falling back to a shared domain",
            private.len(),
            org_guid
        );
    }

    let shared = platform.shared_domains(credential).await?;
    match shared.into_iter().next() {
        Some(domain) => {
            info!("Using shared domain {}", domain);
            Ok(domain)
        }
        None => Err(DeployError::NotFound(format!(
            "no private or shared domain available to org {}",
            org_guid
        ))),
    }
}

/// Make sure a route `<app name>.<domain>` exists
pub async fn converge_route(
    platform: &dyn PlatformApi,
    credential: &Credential,
    target: &AppTarget,
    domain_guid: &str,
) -> Result<Converged, DeployError> {
    if let Some(guid) = platform
        .find_route(credential, &target.app_name, domain_guid)
        .await?
    {
        info!("Reusing route {} for host {}", guid, target.app_name);
        return Ok(Converged { guid, reused: true });
    }

    info!("Creating route for host {}", target.app_name);
    let request = RouteRequest {
        host: target.app_name.clone(),
        domain_guid: domain_guid.to_string(),
        space_guid: target.space_guid.clone(),
    };
    let guid = platform.create_route(credential, &request).await?;
    Ok(Converged {
        guid,
        reused: false,
    })
}
