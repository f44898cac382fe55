//! Error types for the deployer

use thiserror::Error;

use crate::deploy::stage::Stage;

/// Main error type for the deployer
#[derive(Error, Debug)]
pub enum DeployError {
    /// Required run parameters are missing or malformed. Raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential rejected or unusable
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The platform answered with an error status
    #[error("{step}: {description}")]
    Platform { step: String, description: String },

    /// The platform answered with a success status but an unusable body
    #[error("{step}: unexpected response ({reason})")]
    UnexpectedResponse { step: String, reason: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Timed out waiting for {condition} after {attempts} attempts")]
    PollTimeout { condition: String, attempts: u32 },

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Descriptor error: {0}")]
    DescriptorError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required platform object does not exist and cannot be created
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A pipeline step failed; `source` is the first error it encountered
    #[error("{step} failed: {source}")]
    Failed {
        step: Stage,
        #[source]
        source: Box<DeployError>,
    },
}

impl DeployError {
    /// The innermost error, with any pipeline step wrapping removed
    pub fn cause(&self) -> &DeployError {
        match self {
            DeployError::Failed { source, .. } => source.cause(),
            other => other,
        }
    }

    /// The pipeline step that failed, if the error came out of a pipeline
    pub fn step(&self) -> Option<Stage> {
        match self {
            DeployError::Failed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether this is a platform error (HTTP status >= 400 other than 401)
    pub fn is_platform(&self) -> bool {
        matches!(self.cause(), DeployError::Platform { .. })
    }
}

impl From<zip::result::ZipError> for DeployError {
    fn from(err: zip::result::ZipError) -> Self {
        DeployError::ArchiveError(err.to_string())
    }
}
