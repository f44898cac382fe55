//! Package inspection
//!
//! Fetches the application package once, then walks the zip to build the
//! content-addressed resource manifest and pick up an embedded
//! `manifest.yml` deployment descriptor.

pub mod descriptor;
pub mod manifest;
pub mod package;

pub use descriptor::{AppOverrides, DeploymentDescriptor};
pub use manifest::{inspect, Inspection, ResourceEntry, ResourceManifest};
pub use package::{Package, PackageSource};
