//! The `ingress-cli` binary: exit status and output of `check` and `render`.

use std::fs;
use std::process::{Command, Output};

use origin_server::tunnel::{validate_ingress, TunnelConfig};

fn ingress_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ingress-cli"))
        .args(args)
        .output()
        .expect("failed to run ingress-cli")
}

#[test]
fn test_check_accepts_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        "tunnel: lab\ncredentials-file: /tmp/lab.json\ningress:\n  - hostname: origin.example.com\n    service: http://localhost:8000\n  - service: http_status:404\n",
    )
    .unwrap();

    let out = ingress_cli(&["check", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("is valid"), "stdout: {}", stdout);
    assert!(stdout.contains("origin.example.com -> http://localhost:8000/"));
    assert!(stdout.contains("* -> http_status:404"));
}

#[test]
fn test_check_rejects_missing_catch_all() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        "tunnel: lab\ncredentials-file: /tmp/lab.json\ningress:\n  - hostname: origin.example.com\n    service: http://localhost:8000\n",
    )
    .unwrap();

    let out = ingress_cli(&["check", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid"), "stderr: {}", stderr);
    assert!(stderr.contains("catch-all"), "stderr: {}", stderr);
}

#[test]
fn test_check_missing_file_fails() {
    let out = ingress_cli(&["check", "/definitely/not/config.yml"]);
    assert!(!out.status.success());
}

#[test]
fn test_render_prints_valid_config() {
    let out = ingress_cli(&[
        "render",
        "--tunnel",
        "lab",
        "--credentials-file",
        "/tmp/lab.json",
        "--hostname",
        "a.example.com",
        "--hostname",
        "b.example.com",
        "--origin",
        "http://127.0.0.1:8000",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let config = TunnelConfig::from_yaml(&String::from_utf8_lossy(&out.stdout)).unwrap();
    assert_eq!(config.tunnel, "lab");
    assert_eq!(config.ingress.len(), 3);
    assert_eq!(config.ingress[0].hostname.as_deref(), Some("a.example.com"));
    assert_eq!(config.ingress[0].service, "http://127.0.0.1:8000");
    assert!(config.ingress[2].is_catch_all());
    assert_eq!(validate_ingress(&config), Ok(()));
}

#[test]
fn test_render_rejects_bad_origin() {
    let out = ingress_cli(&[
        "render",
        "--tunnel",
        "lab",
        "--credentials-file",
        "/tmp/lab.json",
        "--hostname",
        "a.example.com",
        "--origin",
        "localhost:8000",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid service"));
}
