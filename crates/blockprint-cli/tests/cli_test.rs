//! Runs the `blockprint` binary against snapshot files.

use std::io::Write;
use std::process::Command;

fn snapshot_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn list_snapshot() -> String {
    let mut records = vec![serde_json::json!({
        "node_id": "ul", "tag": "ul", "xpath": "/html/body/ul[1]", "depth": 2,
        "children_ids": ["a", "b", "c"]
    })];
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        records.push(serde_json::json!({
            "node_id": id, "parent_id": "ul", "tag": "li", "depth": 3,
            "xpath": format!("/html/body/ul[1]/li[{}]", i + 1),
            "rect": {"x": 0, "y": i * 50, "width": 200, "height": 40}
        }));
    }
    serde_json::json!({ "doc_id": "cli", "records": records }).to_string()
}

/// The binary pointed at an empty config dir, with no `BLOCKPRINT_*` overrides.
fn blockprint(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_blockprint"));
    cmd.arg("--config-dir").arg(config_dir.path());
    for (key, _) in std::env::vars() {
        if key.starts_with("BLOCKPRINT_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

#[test]
fn test_prints_templates_as_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = snapshot_file(&list_snapshot());
    let output = blockprint(&dir)
        .arg(file.path())
        .args(["--min-internal-depth", "0"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let instances = &value["templates"]["/html/body/ul[1]/li[*]"]["instances"];
    assert_eq!(instances.as_array().map(Vec::len), Some(3));
    assert_eq!(value["diagnostics"]["repeat_groups"], 1);
}

#[test]
fn test_default_depth_drops_flat_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = snapshot_file(&list_snapshot());
    let output = blockprint(&dir).arg(file.path()).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["templates"], serde_json::json!({}));
}

#[test]
fn test_missing_records_exits_with_code() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = snapshot_file(r#"{"doc_id": "x"}"#);
    let output = blockprint(&dir).arg(file.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[SNAPSHOT_ERROR]"), "stderr: {stderr}");
}

#[test]
fn test_duplicate_ids_exit_with_code() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = snapshot_file(
        r#"{"records": [{"node_id": "a", "tag": "div"}, {"node_id": "a", "tag": "p"}]}"#,
    );
    let output = blockprint(&dir).arg(file.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[DUPLICATE_NODE]"));
}

#[test]
fn test_invalid_min_k_is_config_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = snapshot_file(&list_snapshot());
    let output = blockprint(&dir)
        .arg(file.path())
        .args(["--min-k", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[CONFIG_ERROR]"));
}
