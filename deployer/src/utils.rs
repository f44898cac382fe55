//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the deployer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Parse the leading decimal digits of a value, ignoring a trailing unit.
///
/// `"256M"` -> 256, `" 2 "` -> 2, `"G1"` -> None.
pub fn leading_int(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Last `/`-separated segment of a path or URL, without query or fragment
pub fn file_name_of(location: &str) -> &str {
    let location = location
        .split(['?', '#'])
        .next()
        .unwrap_or(location);
    location.rsplit('/').next().unwrap_or(location)
}
