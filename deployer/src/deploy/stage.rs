//! Pipeline steps

use std::fmt;

/// One step of the install or uninstall pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ValidateParams,
    BuildManifest,
    AcquireSession,
    ConvergeApp,
    ConvergeDomain,
    ConvergeRoute,
    BindRoute,
    MatchResources,
    UploadBits,
    AwaitJob,
    StartApp,
    AwaitRunning,
    LookupApp,
    DeleteApp,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ValidateParams => "validate_params",
            Stage::BuildManifest => "build_manifest",
            Stage::AcquireSession => "acquire_session",
            Stage::ConvergeApp => "converge_app",
            Stage::ConvergeDomain => "converge_domain",
            Stage::ConvergeRoute => "converge_route",
            Stage::BindRoute => "bind_route",
            Stage::MatchResources => "match_resources",
            Stage::UploadBits => "upload_bits",
            Stage::AwaitJob => "await_job",
            Stage::StartApp => "start_app",
            Stage::AwaitRunning => "await_running",
            Stage::LookupApp => "lookup_app",
            Stage::DeleteApp => "delete_app",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
