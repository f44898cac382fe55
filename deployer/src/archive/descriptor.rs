//! Embedded deployment descriptor (`manifest.yml`)

use cf_api_models::AppRequest;
use serde::Deserialize;
use serde_yaml::Value;

use crate::errors::DeployError;
use crate::utils::leading_int;

/// File name that marks an embedded descriptor, at any depth in the package
pub const DESCRIPTOR_FILE_NAME: &str = "manifest.yml";

/// Application settings read from the package's `manifest.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentDescriptor {
    pub memory: Option<u64>,
    pub instances: Option<u64>,
    pub disk_quota: Option<u64>,
    pub buildpack: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    applications: Vec<RawApplication>,
}

#[derive(Debug, Deserialize)]
struct RawApplication {
    #[serde(default)]
    memory: Option<Value>,
    #[serde(default)]
    instances: Option<Value>,
    #[serde(default)]
    disk_quota: Option<Value>,
    #[serde(default)]
    buildpack: Option<String>,
}

impl DeploymentDescriptor {
    /// Parse descriptor text. Later `applications` entries overwrite earlier ones key by key.
    pub fn parse(text: &str) -> Result<Self, DeployError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(text)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        let raw: RawDescriptor = serde_yaml::from_value(document)?;

        let mut descriptor = Self::default();
        for app in raw.applications {
            if let Some(memory) = app.memory.as_ref().and_then(quantity) {
                descriptor.memory = Some(memory);
            }
            if let Some(instances) = app.instances.as_ref().and_then(quantity) {
                descriptor.instances = Some(instances);
            }
            if let Some(disk_quota) = app.disk_quota.as_ref().and_then(quantity) {
                descriptor.disk_quota = Some(disk_quota);
            }
            if let Some(buildpack) = app.buildpack.filter(|b| !b.is_empty()) {
                descriptor.buildpack = Some(buildpack);
            }
        }
        Ok(descriptor)
    }
}

/// Positive whole quantity from either a YAML number or a string such as `"256M"`.
/// Zero, negative and fractional values count as absent.
fn quantity(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => leading_int(s),
        _ => None,
    };
    parsed.filter(|n| *n > 0)
}

/// Explicit caller-supplied application settings.
///
/// These are the only keys a caller may override; each one set here wins over
/// the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOverrides {
    pub instances: Option<u64>,
    pub memory: Option<u64>,
    pub disk_quota: Option<u64>,
    pub buildpack: Option<String>,
}

/// Build the app create/update body: descriptor values first, then explicit overrides
pub fn app_request(
    name: &str,
    space_guid: &str,
    descriptor: Option<&DeploymentDescriptor>,
    overrides: &AppOverrides,
) -> AppRequest {
    let mut request = AppRequest {
        name: name.to_string(),
        space_guid: space_guid.to_string(),
        ..Default::default()
    };

    if let Some(d) = descriptor {
        request.memory = d.memory.or(request.memory);
        request.instances = d.instances.or(request.instances);
        request.disk_quota = d.disk_quota.or(request.disk_quota);
        request.buildpack = d.buildpack.clone().or(request.buildpack);
    }

    request.memory = overrides.memory.or(request.memory);
    request.instances = overrides.instances.or(request.instances);
    request.disk_quota = overrides.disk_quota.or(request.disk_quota);
    request.buildpack = overrides.buildpack.clone().or(request.buildpack);

    request
}
