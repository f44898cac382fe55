//! Package inspection tests

mod common;

use std::io::{Cursor, Write};
use std::time::Duration;

use cf_deployer::archive::{inspect, DeploymentDescriptor, PackageSource};
use cf_deployer::errors::DeployError;
use common::{write_package, zip_bytes};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

fn stored_zip(name: &str, content: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer.start_file(name, options).unwrap();
    writer.write_all(content).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Overwrite the uncompressed size in the first central directory header
fn set_declared_size(bytes: &mut [u8], size: u32) {
    let header = bytes.windows(4).position(|w| w == b"PK\x01\x02").unwrap();
    bytes[header + 24..header + 28].copy_from_slice(&size.to_le_bytes());
}

#[test]
fn test_identical_content_hashes_match() {
    let bytes = zip_bytes(&[("a.txt", b"x"), ("b.txt", b"x"), ("c.txt", b"y")]);
    let inspection = inspect(&bytes).unwrap();
    let manifest = inspection.manifest;

    let a = manifest.get("a.txt").unwrap();
    let b = manifest.get("b.txt").unwrap();
    let c = manifest.get("c.txt").unwrap();
    assert_eq!(a.sha1, b.sha1);
    assert_ne!(a.sha1, c.sha1);
    // SHA-1 of "x"
    assert_eq!(a.sha1, "11f6ad8ec52a2984abaafd7c3b516503785c2072");
}

#[test]
fn test_directories_skipped_and_order_kept() {
    let bytes = zip_bytes(&[
        ("app/", b""),
        ("app/index.js", b"console.log(1)"),
        ("app/lib/", b""),
        ("app/lib/util.js", b"module.exports = {}"),
        ("README.md", b"# demo"),
    ]);
    let manifest = inspect(&bytes).unwrap().manifest;

    let paths: Vec<&str> = manifest.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["app/index.js", "app/lib/util.js", "README.md"]);
    assert_eq!(manifest.get("app/index.js").unwrap().size, 14);
    assert_eq!(manifest.total_size(), 14 + 19 + 6);
}

#[test]
fn test_hash_covers_decompressed_content() {
    let content = vec![b'a'; 64 * 1024];
    let bytes = zip_bytes(&[("big.txt", &content)]);
    assert!(bytes.len() < content.len(), "fixture should be compressed");

    let entry = inspect(&bytes).unwrap().manifest.entries()[0].clone();
    let direct = cf_deployer::archive::ResourceEntry::from_content("big.txt", &content);
    assert_eq!(entry, direct);
}

#[test]
fn test_descriptor_found_at_any_depth() {
    let bytes = zip_bytes(&[
        ("index.js", b"x"),
        ("config/manifest.yml", b"applications:\n- memory: 256M\n  instances: 2\n"),
    ]);
    let inspection = inspect(&bytes).unwrap();

    assert_eq!(
        inspection.descriptor,
        Some(DeploymentDescriptor {
            memory: Some(256),
            instances: Some(2),
            ..Default::default()
        })
    );
    // The descriptor is still an ordinary resource
    assert!(inspection.manifest.get("config/manifest.yml").is_some());
}

#[test]
fn test_last_descriptor_wins() {
    let bytes = zip_bytes(&[
        ("a/manifest.yml", b"applications:\n- memory: 128M\n"),
        ("b/manifest.yml", b"applications:\n- memory: 1G\n  buildpack: go\n"),
    ]);
    let descriptor = inspect(&bytes).unwrap().descriptor.unwrap();
    assert_eq!(descriptor.memory, Some(1));
    assert_eq!(descriptor.buildpack.as_deref(), Some("go"));
}

#[test]
fn test_no_descriptor() {
    let bytes = zip_bytes(&[("manifest.yaml", b"applications: []"), ("my-manifest.yml", b"x")]);
    assert!(inspect(&bytes).unwrap().descriptor.is_none());
}

#[test]
fn test_truncated_archive_is_hard_failure() {
    let bytes = zip_bytes(&[("a.txt", b"hello"), ("b.txt", b"world")]);
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(inspect(truncated), Err(DeployError::ArchiveError(_))));
}

#[test]
fn test_entry_size_is_bytes_read() {
    let bytes = stored_zip("a.txt", b"hello");
    let manifest = inspect(&bytes).unwrap().manifest;
    assert_eq!(manifest.get("a.txt").unwrap().size, 5);
}

#[test]
fn test_declared_size_mismatch_is_hard_failure() {
    for declared in [3u32, 0xFFFF_FFF0] {
        let mut bytes = stored_zip("a.txt", b"hello");
        set_declared_size(&mut bytes, declared);
        assert!(
            matches!(inspect(&bytes), Err(DeployError::ArchiveError(_))),
            "declared size {} was accepted",
            declared
        );
    }
}

#[test]
fn test_malformed_descriptor_fails_inspection() {
    let bytes = zip_bytes(&[("manifest.yml", b"applications: [oops")]);
    assert!(matches!(inspect(&bytes), Err(DeployError::DescriptorError(_))));
}

#[tokio::test]
async fn test_fetch_local_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_package(dir.path(), "demo.zip", &[("a.txt", b"x")]);

    let source = PackageSource::parse(path.to_str().unwrap()).unwrap();
    let package = source.fetch(Duration::from_secs(5)).await.unwrap();

    assert_eq!(package.file_name, "demo.zip");
    assert_eq!(package.bytes, std::fs::read(&path).unwrap());
}

#[tokio::test]
async fn test_fetch_empty_package_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.zip");
    std::fs::write(&path, b"").unwrap();

    let source = PackageSource::Path(path);
    let err = source.fetch(Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, DeployError::ArchiveError(_)));
}

#[tokio::test]
async fn test_fetch_remote_package() {
    let bytes = zip_bytes(&[("a.txt", b"x")]);
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/builds/demo.zip")
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(bytes.clone())
        .create_async()
        .await;

    let source = PackageSource::parse(&format!("{}/builds/demo.zip", server.url())).unwrap();
    let package = source.fetch(Duration::from_secs(5)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(package.file_name, "demo.zip");
    assert_eq!(package.bytes, bytes);
}

#[tokio::test]
async fn test_fetch_remote_package_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/missing.zip")
        .with_status(404)
        .create_async()
        .await;

    let source = PackageSource::parse(&format!("{}/missing.zip", server.url())).unwrap();
    let err = source.fetch(Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, DeployError::ArchiveError(_)));
}
