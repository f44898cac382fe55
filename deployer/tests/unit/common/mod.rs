//! Shared test fixtures: an in-memory platform and package builders

#![allow(dead_code)]

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use cf_api_models::{AppRequest, RouteRequest};
use cf_deployer::archive::{inspect, Package, ResourceEntry};
use cf_deployer::authn::credential::Credential;
use cf_deployer::errors::DeployError;
use cf_deployer::platform::{AppState, InstanceStatus, JobStatus, PlatformApi};
use secrecy::{ExposeSecret, SecretString};
use zip::write::SimpleFileOptions;

pub const PASSWORD: &str = "secret";

#[derive(Debug, Clone)]
pub struct FakeApp {
    pub guid: String,
    pub request: AppRequest,
    pub state: AppState,
}

#[derive(Debug, Clone)]
pub struct FakeRoute {
    pub guid: String,
    pub host: String,
    pub domain_guid: String,
    pub space_guid: String,
}

#[derive(Debug, Clone)]
pub struct FakeUpload {
    pub app_guid: String,
    pub file_name: String,
    pub bytes: usize,
    pub matched: Vec<ResourceEntry>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub apps: Vec<FakeApp>,
    pub routes: Vec<FakeRoute>,
    pub bindings: Vec<(String, String)>,
    /// (guid, name)
    pub private_domains: Vec<(String, String)>,
    /// (guid, name)
    pub shared_domains: Vec<(String, String)>,
    pub cached_sha1: HashSet<String>,
    pub uploads: Vec<FakeUpload>,
    pub calls: Vec<&'static str>,
    /// Job polls that report "still running" before the sentinel appears
    pub job_polls_before_done: u32,
    pub job_never_finishes: bool,
    job_polls: u32,
    /// Stats polls that report "starting" after the app is started
    pub stats_polls_before_running: u32,
    stats_polls: u32,
    /// Call name that fails with a platform error carrying this description
    pub fail_call: Option<(&'static str, String)>,
    next_id: u32,
}

impl FakeState {
    fn next_guid(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn domain_name(&self, guid: &str) -> Option<String> {
        self.private_domains
            .iter()
            .chain(self.shared_domains.iter())
            .find(|(g, _)| g == guid)
            .map(|(_, name)| name.clone())
    }
}

/// In-memory control plane that behaves idempotently like the real one
pub struct FakePlatform {
    pub state: Mutex<FakeState>,
}

impl FakePlatform {
    pub fn new() -> Self {
        let state = FakeState {
            shared_domains: vec![("shared-domain-1".to_string(), "apps.example.com".to_string())],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with<F: FnOnce(&mut FakeState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == call)
            .count()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn snapshot<T, F: FnOnce(&FakeState) -> T>(&self, f: F) -> T {
        f(&self.state.lock().unwrap())
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, DeployError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some((name, description)) = &state.fail_call {
            if *name == call {
                return Err(DeployError::Platform {
                    step: call.to_string(),
                    description: description.clone(),
                });
            }
        }
        Ok(state)
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn login(&self, username: &str, password: &SecretString) -> Result<Credential, DeployError> {
        let mut state = self.enter("login")?;
        if password.expose_secret() != PASSWORD {
            return Err(DeployError::AuthError("login: 401 Unauthorized".to_string()));
        }
        let token = state.next_guid(username);
        Ok(Credential::new("bearer", token))
    }

    async fn find_app(
        &self,
        _credential: &Credential,
        space_guid: &str,
        name: &str,
    ) -> Result<Option<String>, DeployError> {
        let state = self.enter("find_app")?;
        Ok(state
            .apps
            .iter()
            .find(|a| a.request.name == name && a.request.space_guid == space_guid)
            .map(|a| a.guid.clone()))
    }

    async fn create_app(&self, _credential: &Credential, request: &AppRequest) -> Result<String, DeployError> {
        let mut state = self.enter("create_app")?;
        let guid = state.next_guid("app");
        state.apps.push(FakeApp {
            guid: guid.clone(),
            request: request.clone(),
            state: AppState::Stopped,
        });
        Ok(guid)
    }

    async fn update_app(
        &self,
        _credential: &Credential,
        app_guid: &str,
        request: &AppRequest,
    ) -> Result<String, DeployError> {
        let mut state = self.enter("update_app")?;
        let app = state
            .apps
            .iter_mut()
            .find(|a| a.guid == app_guid)
            .ok_or_else(|| DeployError::Platform {
                step: "update_app".to_string(),
                description: "The app could not be found".to_string(),
            })?;
        app.request = request.clone();
        Ok(app.guid.clone())
    }

    async fn set_app_state(
        &self,
        _credential: &Credential,
        app_guid: &str,
        app_state: AppState,
    ) -> Result<(), DeployError> {
        let mut state = self.enter("set_app_state")?;
        if app_state == AppState::Started {
            state.stats_polls = 0;
        }
        let app = state
            .apps
            .iter_mut()
            .find(|a| a.guid == app_guid)
            .ok_or_else(|| DeployError::Platform {
                step: "change_app_state".to_string(),
                description: "The app could not be found".to_string(),
            })?;
        app.state = app_state;
        Ok(())
    }

    async fn private_domains(&self, _credential: &Credential, _org_guid: &str) -> Result<Vec<String>, DeployError> {
        let state = self.enter("private_domains")?;
        Ok(state.private_domains.iter().map(|(g, _)| g.clone()).collect())
    }

    async fn shared_domains(&self, _credential: &Credential) -> Result<Vec<String>, DeployError> {
        let state = self.enter("shared_domains")?;
        Ok(state.shared_domains.iter().map(|(g, _)| g.clone()).collect())
    }

    async fn find_route(
        &self,
        _credential: &Credential,
        host: &str,
        domain_guid: &str,
    ) -> Result<Option<String>, DeployError> {
        let state = self.enter("find_route")?;
        Ok(state
            .routes
            .iter()
            .find(|r| r.host == host && r.domain_guid == domain_guid)
            .map(|r| r.guid.clone()))
    }

    async fn create_route(&self, _credential: &Credential, request: &RouteRequest) -> Result<String, DeployError> {
        let mut state = self.enter("create_route")?;
        let guid = state.next_guid("route");
        state.routes.push(FakeRoute {
            guid: guid.clone(),
            host: request.host.clone(),
            domain_guid: request.domain_guid.clone(),
            space_guid: request.space_guid.clone(),
        });
        Ok(guid)
    }

    async fn bind_route(&self, _credential: &Credential, app_guid: &str, route_guid: &str) -> Result<(), DeployError> {
        let mut state = self.enter("bind_route")?;
        let binding = (app_guid.to_string(), route_guid.to_string());
        if !state.bindings.contains(&binding) {
            state.bindings.push(binding);
        }
        Ok(())
    }

    async fn match_resources(
        &self,
        _credential: &Credential,
        resources: &[ResourceEntry],
    ) -> Result<Vec<ResourceEntry>, DeployError> {
        let state = self.enter("match_resources")?;
        Ok(resources
            .iter()
            .filter(|r| state.cached_sha1.contains(&r.sha1))
            .cloned()
            .collect())
    }

    async fn upload_bits(
        &self,
        _credential: &Credential,
        app_guid: &str,
        package: &Package,
        matched: &[ResourceEntry],
    ) -> Result<String, DeployError> {
        let mut state = self.enter("upload_bits")?;
        let inspection = inspect(&package.bytes)?;
        for entry in inspection.manifest.entries() {
            state.cached_sha1.insert(entry.sha1.clone());
        }
        state.uploads.push(FakeUpload {
            app_guid: app_guid.to_string(),
            file_name: package.file_name.clone(),
            bytes: package.len(),
            matched: matched.to_vec(),
        });
        state.job_polls = 0;
        Ok(state.next_guid("job"))
    }

    async fn job_status(&self, _credential: &Credential, job_guid: &str) -> Result<JobStatus, DeployError> {
        let mut state = self.enter("job_status")?;
        state.job_polls += 1;
        if state.job_never_finishes || state.job_polls <= state.job_polls_before_done {
            return Ok(JobStatus {
                guid: job_guid.to_string(),
                status: Some("running".to_string()),
            });
        }
        Ok(JobStatus {
            guid: "0".to_string(),
            status: Some("finished".to_string()),
        })
    }

    async fn app_instances(&self, _credential: &Credential, app_guid: &str) -> Result<Vec<InstanceStatus>, DeployError> {
        let mut state = self.enter("app_instances")?;
        let app = state
            .apps
            .iter()
            .find(|a| a.guid == app_guid)
            .cloned()
            .ok_or_else(|| DeployError::Platform {
                step: "app_stats".to_string(),
                description: "The app could not be found".to_string(),
            })?;

        let uris: Vec<String> = state
            .bindings
            .iter()
            .filter(|(a, _)| *a == app.guid)
            .filter_map(|(_, r)| state.routes.iter().find(|route| route.guid == *r))
            .filter_map(|route| {
                state
                    .domain_name(&route.domain_guid)
                    .map(|domain| format!("{}.{}", route.host, domain))
            })
            .collect();

        state.stats_polls += 1;
        let running =
            app.state == AppState::Started && state.stats_polls > state.stats_polls_before_running;
        let count = app.request.instances.unwrap_or(1) as u32;

        Ok((0..count)
            .map(|index| InstanceStatus {
                index,
                state: if running { "RUNNING" } else { "STARTING" }.to_string(),
                uris: if running { uris.clone() } else { Vec::new() },
            })
            .collect())
    }

    async fn delete_app(&self, _credential: &Credential, app_guid: &str) -> Result<(), DeployError> {
        let mut state = self.enter("delete_app")?;
        let bound: Vec<String> = state
            .bindings
            .iter()
            .filter(|(a, _)| a == app_guid)
            .map(|(_, r)| r.clone())
            .collect();
        state.apps.retain(|a| a.guid != app_guid);
        state.bindings.retain(|(a, _)| a != app_guid);
        state.routes.retain(|r| !bound.contains(&r.guid));
        Ok(())
    }
}

/// Build a zip package in memory
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Write a zip package into `dir` and return its path
pub fn write_package(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, zip_bytes(files)).unwrap();
    path
}
