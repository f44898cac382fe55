//! Run parameters

use crate::archive::{AppOverrides, PackageSource};
use crate::authn::credential::Credentials;
use crate::errors::DeployError;

/// The application a run acts on
#[derive(Debug, Clone)]
pub struct AppTarget {
    pub app_name: String,
    pub space_guid: String,
}

impl AppTarget {
    pub fn new(app_name: impl Into<String>, space_guid: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            space_guid: space_guid.into(),
        }
    }
}

/// Parameters for an install run
#[derive(Debug, Clone)]
pub struct InstallParams {
    pub target: AppTarget,
    pub org_guid: String,
    pub package: PackageSource,
    pub overrides: AppOverrides,
    pub credentials: Credentials,
}

/// Parameters for an uninstall run
#[derive(Debug, Clone)]
pub struct UninstallParams {
    pub target: AppTarget,
    pub credentials: Credentials,
}

impl InstallParams {
    pub fn validate(&self) -> Result<(), DeployError> {
        let mut missing = common_missing(&self.target, &self.credentials);
        if self.org_guid.trim().is_empty() {
            missing.push("org");
        }
        reject_missing(missing)?;

        if self.overrides.instances == Some(0) {
            return Err(DeployError::Validation(
                "instances must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl UninstallParams {
    pub fn validate(&self) -> Result<(), DeployError> {
        reject_missing(common_missing(&self.target, &self.credentials))
    }
}

fn common_missing(target: &AppTarget, credentials: &Credentials) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if target.app_name.trim().is_empty() {
        missing.push("app");
    }
    if target.space_guid.trim().is_empty() {
        missing.push("space");
    }
    if credentials.username.trim().is_empty() {
        missing.push("username");
    }
    missing
}

fn reject_missing(missing: Vec<&'static str>) -> Result<(), DeployError> {
    if missing.is_empty() {
        return Ok(());
    }
    Err(DeployError::Validation(format!(
        "Not enough parameters: missing {}",
        missing.join(", ")
    )))
}
