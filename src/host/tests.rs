use super::*;
use crate::filesystem::LocalFilesystem;
use crate::platform::GenericInstaller;
use crate::registry::FsRegistry;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn host_at(root: &Path) -> McpHost {
    McpHost::new(PackageManager::with_parts(
        root.to_path_buf(),
        Box::new(LocalFilesystem),
        Box::new(GenericInstaller::new("linux")),
        Box::new(FsRegistry::new(root)),
    ))
}

fn install_options(id: &str, file_path: PathBuf) -> InstallOptions {
    InstallOptions {
        id: id.to_string(),
        name: "Redis Cache".to_string(),
        version: "6.2.6".to_string(),
        file_path,
        target_path: None,
    }
}

#[test]
fn install_response_reports_path_in_camel_case() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("mcps");
    let source = dir.path().join("redis.tar");
    fs::write(&source, "tar").expect("source");
    let host = host_at(&root);

    let response = host.install(&install_options("redis-cache", source));
    assert!(response.success);

    let json: Value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(
        json["installPath"].as_str().map(PathBuf::from),
        Some(root.join("redis-cache").join("redis.tar"))
    );
    assert!(json.get("error").is_none());
    assert!(json.get("errorKind").is_none());
}

#[test]
fn install_failure_carries_error_kind() {
    let dir = tempdir().expect("tempdir");
    let host = host_at(&dir.path().join("mcps"));

    let response = host.install(&install_options("tool", dir.path().join("missing.bin")));
    assert!(!response.success);
    assert!(response.install_path.is_none());

    let json: Value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["errorKind"], "source_not_found");
    assert!(
        json["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("missing.bin"))
    );
}

#[test]
fn info_for_unknown_id_is_success_with_null_record() {
    let dir = tempdir().expect("tempdir");
    let host = host_at(&dir.path().join("mcps"));

    let response = host.get_install_info("nothing-here");
    assert!(response.success);

    let json: Value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["record"], Value::Null);
}

#[test]
fn uninstall_response_round_trip() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("mcps");
    let source = dir.path().join("tool.bin");
    fs::write(&source, "bin").expect("source");
    let host = host_at(&root);

    let installed = host.install(&install_options("tool", source));
    let response = host.uninstall(&UninstallOptions {
        id: "tool".to_string(),
        install_path: installed.install_path.expect("path"),
    });
    assert!(response.success);
    assert!(host.get_install_info("tool").record.is_none());

    let rejected = host.uninstall(&UninstallOptions {
        id: "bad id".to_string(),
        install_path: PathBuf::new(),
    });
    assert!(!rejected.success);
    assert_eq!(rejected.error_kind, Some(ErrorKind::InvalidInput));
}

#[test]
fn list_response_includes_every_record() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("mcps");
    let host = host_at(&root);
    for id in ["beta", "alpha"] {
        let source = dir.path().join(format!("{}.bin", id));
        fs::write(&source, id).expect("source");
        assert!(host.install(&install_options(id, source)).success);
    }

    let response = host.list();
    assert!(response.success);
    let ids: Vec<&str> = response.packages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "beta"]);

    let json: Value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["packages"][0]["artifactPresent"], Value::Bool(true));
}
