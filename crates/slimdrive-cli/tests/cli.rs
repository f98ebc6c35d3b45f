#![cfg(unix)]

//! End-to-end tests for the `slimdrive` and `slimdrive-grid` binaries.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

const DRIVER: &str = env!("CARGO_BIN_EXE_slimdrive");
const GRID: &str = env!("CARGO_BIN_EXE_slimdrive-grid");

/// Stand-in simulators, written once before any test spawns a process.
fn fixtures() -> &'static Path {
    static DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("tempdir");
        let scripts = [
            ("suppress", "echo generation 120\necho SUPPRESSION"),
            ("persist", "echo generation 1000\necho no suppression here"),
        ];
        for (name, body) in scripts {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
        }
        dir
    })
    .path()
}

fn script(name: &str) -> PathBuf {
    fixtures().join(name)
}

fn driver(args: &[&str]) -> std::process::Output {
    Command::new(DRIVER)
        .args(args)
        .env_remove("SLIM_BIN")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run slimdrive")
}

#[test]
fn prints_single_summary_line() {
    let slim = script("suppress");
    let output = driver(&["--slim", slim.to_str().unwrap(), "--nreps", "3"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0.1,1.0,1.0\n");
}

#[test]
fn echoes_rates_and_zero_fraction() {
    let slim = script("persist");
    let output = driver(&[
        "--slim",
        slim.to_str().unwrap(),
        "--nreps",
        "2",
        "--embryo-res",
        "0.050",
        "--germline-res",
        "0.750",
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0.05,0.75,0.0\n");
}

#[test]
fn slim_bin_env_selects_simulator() {
    fixtures();
    let output = Command::new(DRIVER)
        .args(["--nreps", "1"])
        .env("SLIM_BIN", script("suppress"))
        .output()
        .expect("failed to run slimdrive");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0.1,1.0,1.0\n");
}

#[test]
fn zero_replicates_exits_nonzero_without_output() {
    fixtures();
    let output = driver(&["--nreps", "0"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_simulator_exits_nonzero_without_output() {
    let missing = fixtures().join("no-such-slim");
    let output = driver(&["--slim", missing.to_str().unwrap(), "--nreps", "1"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no-such-slim"));
}

#[test]
fn grid_emits_thirty_lines() {
    fixtures();
    let output = Command::new(GRID)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run slimdrive-grid");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 30);
    assert_eq!(
        lines[0],
        "slimdrive --src distant_site_pan_TA.slim --nreps 10 --embryo-res 0.000 --germline-res 0.750"
    );
    assert!(lines[6].contains("--embryo-res 0.050 --germline-res 0.750"));
}
