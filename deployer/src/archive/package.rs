//! Package sources

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::utils::file_name_of;

/// Where the application package comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// Remote package, fetched once over HTTP(S)
    Url(Url),

    /// Package on the local filesystem
    Path(PathBuf),
}

impl PackageSource {
    /// Interpret a location given on the command line
    pub fn parse(location: &str) -> Result<Self, DeployError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(DeployError::Validation(
                "package location is empty".to_string(),
            ));
        }

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(PackageSource::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(PackageSource::Path)
                .map_err(|_| DeployError::Validation(format!("invalid file URL: {}", location))),
            _ => Ok(PackageSource::Path(PathBuf::from(location))),
        }
    }

    /// File name used for the upload part
    pub fn file_name(&self) -> String {
        match self {
            PackageSource::Url(url) => file_name_of(url.path()).to_string(),
            PackageSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name_of(&path.to_string_lossy()).to_string()),
        }
    }

    /// Retrieve the package bytes. Called once per run; the bytes are reused for upload.
    pub async fn fetch(&self, timeout: Duration) -> Result<Package, DeployError> {
        let bytes = match self {
            PackageSource::Url(url) => {
                debug!("GET {}", url);
                let client = Client::builder().timeout(timeout).build()?;
                let response = client.get(url.clone()).send().await?;
                if response.status() != StatusCode::OK {
                    return Err(DeployError::ArchiveError(format!(
                        "Can not get file: {} returned {}",
                        url,
                        response.status()
                    )));
                }
                response.bytes().await?.to_vec()
            }
            PackageSource::Path(path) => File::new(path).read_bytes().await.map_err(|e| {
                DeployError::ArchiveError(format!("Can not get file {}: {}", path.display(), e))
            })?,
        };

        let package = Package::new(self.file_name(), bytes);
        if package.is_empty() {
            return Err(DeployError::ArchiveError(format!("Package {} is empty", self)));
        }
        info!("Fetched package {} ({} bytes)", self, package.len());
        Ok(package)
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSource::Url(url) => write!(f, "{}", url),
            PackageSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw package bytes, retained for the differential upload
#[derive(Debug, Clone)]
pub struct Package {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Package {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
