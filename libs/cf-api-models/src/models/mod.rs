//! API models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// OAuth token response from the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token_type: Option<String>,
    pub access_token: Option<String>,
}

/// Metadata block attached to every v2 resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A single v2 resource: metadata plus an entity body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<E = serde_json::Value> {
    #[serde(default)]
    pub metadata: Metadata,
    pub entity: Option<E>,
}

impl<E> Resource<E> {
    pub fn guid(&self) -> Option<&str> {
        self.metadata.guid.as_deref()
    }
}

/// Paginated v2 list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<E = serde_json::Value> {
    pub total_results: Option<u64>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

impl<E> Page<E> {
    /// Guid of the first resource, if the page reports any results
    pub fn first_guid(&self) -> Option<&str> {
        match self.total_results {
            Some(0) | None => None,
            Some(_) => self.resources.iter().find_map(|r| r.guid()),
        }
    }

    /// Guids of every resource on the page
    pub fn guids(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter_map(|r| r.guid().map(str::to_string))
            .collect()
    }
}

/// Body of an app create or update request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRequest {
    pub name: String,
    pub space_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_quota: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildpack: Option<String>,
}

/// Body of an app state transition request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStateRequest {
    pub state: String,
}

/// Body of a route create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub host: String,
    pub domain_guid: String,
    pub space_guid: String,
}

/// Entity of an asynchronous job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobEntity {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One entry of the `/stats` response, keyed by instance index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStats {
    pub state: String,
    #[serde(default)]
    pub stats: Option<InstanceStatsDetail>,
}

/// Runtime details reported for a running instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceStatsDetail {
    #[serde(default)]
    pub uris: Vec<String>,
}

/// The `/stats` response
pub type AppStats = BTreeMap<String, InstanceStats>;

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
