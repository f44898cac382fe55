//! Per-run state

use crate::authn::session::SessionManager;

/// Platform objects discovered or created during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteIdentifiers {
    pub app_guid: Option<String>,
    pub domain_guid: Option<String>,
    pub route_guid: Option<String>,
    pub job_guid: Option<String>,
}

/// Identifiers and session one run accumulates. Created empty at the start of every run and
/// owned by that run alone.
#[derive(Debug, Default)]
pub struct RunContext {
    pub ids: RemoteIdentifiers,
    pub session: SessionManager,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }
}
