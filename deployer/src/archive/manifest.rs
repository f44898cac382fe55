//! Content-addressed resource manifest

use std::io::{Cursor, Read};

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::archive::descriptor::{DeploymentDescriptor, DESCRIPTOR_FILE_NAME};
use crate::errors::DeployError;
use crate::utils::file_name_of;

/// One file inside the package, as the resource-match protocol names it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Path relative to the package root
    #[serde(rename = "fn")]
    pub path: String,

    /// Uncompressed size in bytes
    pub size: u64,

    /// Lowercase hex SHA-1 of the decompressed content
    pub sha1: String,
}

impl ResourceEntry {
    pub fn from_content(path: impl Into<String>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            size: content.len() as u64,
            sha1: hex::encode(Sha1::digest(content)),
        }
    }
}

/// Every non-directory entry of a package, in archive order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceManifest {
    entries: Vec<ResourceEntry>,
}

impl ResourceManifest {
    pub fn new(entries: Vec<ResourceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total uncompressed size of all entries
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn get(&self, path: &str) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

/// Result of inspecting a package
#[derive(Debug, Clone)]
pub struct Inspection {
    pub manifest: ResourceManifest,
    pub descriptor: Option<DeploymentDescriptor>,
}

/// Walk the package and hash every file. Any read failure invalidates the whole package.
pub fn inspect(bytes: &[u8]) -> Result<Inspection, DeployError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());
    let mut descriptor = None;

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }

        let path = file.name().to_string();
        let declared = file.size();
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(|e| {
            DeployError::ArchiveError(format!("Failed to read {}: {}", path, e))
        })?;
        if content.len() as u64 != declared {
            return Err(DeployError::ArchiveError(format!(
                "{} declares {} bytes but holds {}",
                path,
                declared,
                content.len()
            )));
        }

        if file_name_of(&path) == DESCRIPTOR_FILE_NAME {
            debug!("Found deployment descriptor at {}", path);
            let text = String::from_utf8_lossy(&content);
            descriptor = Some(DeploymentDescriptor::parse(&text)?);
        }

        entries.push(ResourceEntry::from_content(path, &content));
    }

    let manifest = ResourceManifest::new(entries);
    info!(
        "Package holds {} files ({} bytes uncompressed){}",
        manifest.len(),
        manifest.total_size(),
        if descriptor.is_some() { ", with descriptor" } else { "" }
    );

    Ok(Inspection {
        manifest,
        descriptor,
    })
}
