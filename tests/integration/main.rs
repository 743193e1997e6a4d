//! Integration tests for codectx
//!
//! These tests drive the compiled binary against small fixture repositories.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn codectx() -> Command {
    Command::new(env!("CARGO_BIN_EXE_codectx"))
}

fn fixture_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir_all(root.join("api")).unwrap();
    fs::create_dir_all(root.join("ui")).unwrap();
    fs::write(
        root.join("api/server.py"),
        "class Server:\n    def start(self):\n        pass\n",
    )
    .unwrap();
    fs::write(
        root.join("ui/Header.tsx"),
        "import React from 'react';\nexport const Header: React.FC = () => {\n  return null;\n};\n",
    )
    .unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"dependencies": {"react": "^18.2.0"}, "devDependencies": {"typescript": "5.4.0"}}"#,
    )
    .unwrap();
    fs::write(root.join("requirements.txt"), "# api\nfastapi==0.110.0\nuvicorn\n").unwrap();

    temp_dir
}

fn scan_to_value(root: &Path) -> serde_json::Value {
    let output = codectx()
        .args(["scan", "--root"])
        .arg(root)
        .output()
        .expect("Failed to execute codectx");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = codectx().arg("--help").output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Structural Code Context Graph scanner"));
}

#[test]
fn test_version() {
    let output = codectx().arg("version").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("codectx v"));
}

#[test]
fn test_scan_stdout_shape() {
    let repo = fixture_repo();
    let graph = scan_to_value(repo.path());

    assert_eq!(graph["edges"], serde_json::json!([]));
    assert_eq!(graph["language_stats"]["Python"], 1);
    assert_eq!(graph["language_stats"]["TypeScript"], 1);

    let nodes = graph["nodes"].as_array().unwrap();
    let ids: Vec<_> = nodes.iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["api_server.Server", "api_server.start", "ui_Headerx.Header"]);
    assert_eq!(nodes[2]["type"], "component");

    let server = &graph["modules"]["api_server"];
    assert_eq!(server["path"], "api/server.py");
    assert!(server.get("language").is_none());
    assert_eq!(graph["modules"]["ui_Headerx"]["language"], "typescript");
    assert_eq!(graph["modules"]["ui_Headerx"]["imports"], serde_json::json!(["react"]));

    let deps = graph["dependencies"].as_array().unwrap();
    let rendered: Vec<_> = deps
        .iter()
        .map(|d| {
            format!(
                "{}@{}:{}",
                d["name"].as_str().unwrap(),
                d["version"].as_str().unwrap(),
                d["type"].as_str().unwrap()
            )
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            "react@^18.2.0:dependency",
            "typescript@5.4.0:devDependency",
            "fastapi@0.110.0:dependency",
            "uvicorn@latest:dependency",
        ]
    );
}

#[test]
fn test_scan_writes_output_file() {
    let repo = fixture_repo();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("reports/code_graph.json");

    let status = codectx()
        .args(["scan", "--compact", "--root"])
        .arg(repo.path())
        .arg("--output")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let written = fs::read_to_string(&out).unwrap();
    assert!(!written.contains('\n'));
    let graph: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 3);
}

#[test]
fn test_repeated_scans_are_identical() {
    let repo = fixture_repo();
    let first = codectx().args(["scan", "--root"]).arg(repo.path()).output().unwrap();
    let second = codectx().args(["scan", "--root"]).arg(repo.path()).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_config_restricts_languages() {
    let repo = fixture_repo();
    let config = repo.path().join("codectx.toml");
    fs::write(&config, "languages = [\"Python\"]\ninclude_dependencies = false\n").unwrap();

    let output = codectx()
        .args(["scan", "--root"])
        .arg(repo.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let graph: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph["modules"].as_object().unwrap().len(), 1);
    assert_eq!(graph["dependencies"], serde_json::json!([]));
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let output = codectx()
        .args(["scan", "--root"])
        .arg(dir.path().join("missing"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
