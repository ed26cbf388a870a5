#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn mapty(store: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("mapty");
    cmd.env_remove("RUST_LOG")
        .env_remove("MAPTY_STRICT_ELEVATION")
        .arg("--store")
        .arg(store);
    cmd
}

/// Fresh store path inside a temp dir that lives as long as the returned guard.
pub fn temp_store() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("mapty.sqlite");
    (dir, path)
}

pub fn add_running(store: &Path, lat: &str, lng: &str, distance: &str, duration: &str, cadence: &str) {
    mapty(store)
        .args([
            "add",
            "running",
            "--lat",
            lat,
            "--lng",
            lng,
            "--distance",
            distance,
            "--duration",
            duration,
            "--cadence",
            cadence,
        ])
        .assert()
        .success();
}

pub fn list_json(store: &Path) -> serde_json::Value {
    let out = mapty(store)
        .args(["list", "--json"])
        .output()
        .expect("run list --json");
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).expect("list --json prints JSON")
}
