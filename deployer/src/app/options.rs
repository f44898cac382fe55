//! Command-line options

use std::collections::HashMap;
use std::path::PathBuf;

use crate::archive::{AppOverrides, PackageSource};
use crate::authn::credential::Credentials;
use crate::deploy::{AppTarget, InstallParams, UninstallParams};
use crate::errors::DeployError;
use crate::logs::LogLevel;
use crate::settings::Settings;

/// Environment variable holding the username when `--username` is absent
pub const USERNAME_ENV_VAR: &str = "CF_USERNAME";

/// Environment variable holding the password when `--password` is absent
pub const PASSWORD_ENV_VAR: &str = "CF_PASSWORD";

/// Settings file read when `--settings` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "cf-deployer.json";

/// Parsed `--key=value` and `--flag` arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    values: HashMap<String, String>,
}

impl CliArgs {
    /// Parse arguments, skipping the program name
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = HashMap::new();
        for arg in args.into_iter().skip(1) {
            let arg = arg.as_ref();
            if let Some((key, value)) = arg.split_once('=') {
                let clean_key = key.trim_start_matches('-');
                values.insert(clean_key.to_string(), value.to_string());
            } else if arg.starts_with("--") {
                let clean_key = arg.trim_start_matches('-');
                values.insert(clean_key.to_string(), "true".to_string());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, DeployError> {
        self.get(key)
            .map(|v| match v {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                other => Err(DeployError::Validation(format!(
                    "--{} expects true or false, got {}",
                    key, other
                ))),
            })
            .transpose()
    }

    fn number(&self, key: &str) -> Result<Option<u64>, DeployError> {
        self.get(key)
            .map(|v| {
                v.parse::<u64>().map_err(|_| {
                    DeployError::Validation(format!("--{} expects a number, got {}", key, v))
                })
            })
            .transpose()
    }

    /// Settings file location
    pub fn settings_path(&self) -> PathBuf {
        PathBuf::from(self.get("settings").unwrap_or(DEFAULT_SETTINGS_FILE))
    }

    /// Apply endpoint and logging overrides on top of file settings
    pub fn apply_to(&self, settings: &mut Settings) -> Result<(), DeployError> {
        if let Some(host) = self.get("login") {
            settings.endpoints.login.host = host.to_string();
        }
        if let Some(ssl) = self.flag("login-ssl")? {
            settings.endpoints.login.ssl = ssl;
        }
        if let Some(host) = self.get("api") {
            settings.endpoints.api.host = host.to_string();
        }
        if let Some(ssl) = self.flag("api-ssl")? {
            settings.endpoints.api.ssl = ssl;
        }
        if let Some(level) = self.get("log-level") {
            settings.log_level = level
                .parse::<LogLevel>()
                .map_err(DeployError::Validation)?;
        }
        if let Some(json) = self.flag("log-json")? {
            settings.log_json = json;
        }
        Ok(())
    }

    fn target(&self) -> AppTarget {
        AppTarget::new(
            self.get("app").unwrap_or_default(),
            self.get("space").unwrap_or_default(),
        )
    }

    fn credentials<E>(&self, env: E) -> Credentials
    where
        E: Fn(&str) -> Option<String>,
    {
        let username = self
            .get("username")
            .map(str::to_string)
            .or_else(|| env(USERNAME_ENV_VAR))
            .unwrap_or_default();
        let password = self
            .get("password")
            .map(str::to_string)
            .or_else(|| env(PASSWORD_ENV_VAR))
            .unwrap_or_default();
        Credentials::new(username, password)
    }

    /// Build install parameters. `env` resolves environment variables.
    pub fn install_params<E>(&self, env: E) -> Result<InstallParams, DeployError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let package = self
            .get("package")
            .ok_or_else(|| DeployError::Validation("Not enough parameters: missing package".to_string()))?;

        Ok(InstallParams {
            target: self.target(),
            org_guid: self.get("org").unwrap_or_default().to_string(),
            package: PackageSource::parse(package)?,
            overrides: AppOverrides {
                instances: self.number("instances")?,
                memory: self.number("memory")?,
                disk_quota: self.number("disk-quota")?,
                buildpack: self.get("buildpack").map(str::to_string),
            },
            credentials: self.credentials(env),
        })
    }

    /// Build uninstall parameters. `env` resolves environment variables.
    pub fn uninstall_params<E>(&self, env: E) -> UninstallParams
    where
        E: Fn(&str) -> Option<String>,
    {
        UninstallParams {
            target: self.target(),
            credentials: self.credentials(env),
        }
    }
}
