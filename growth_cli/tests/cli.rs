use assert_cmd::{assert::OutputAssertExt, Command};
use growth_targets::MockCatalog;
use predicates::prelude::*;
use serde_json::{json, Value};

const ENV_VARS: &[&str] = &[
    "GROWTH_CONFIG",
    "STREAMR_API_BASE",
    "STREAMR_PUBLISH_BASE",
    "STREAMR_GROWTH_PRODUCTS_STREAM_ID",
    "STREAMR_GROWTH_STREAMS_STREAM_ID",
    "STREAMR_SESSION_TOKEN",
    "STREAMR_PRIVATE_KEY",
    "GROWTH_PACING",
    "GROWTH_MAX_CONCURRENT_PRODUCTS",
];

/// Runs in an empty directory so no stray `.env` leaks into the test.
fn growth(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("growth").unwrap();
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_validate_requires_destinations() {
    let dir = tempfile::tempdir().unwrap();

    growth(&dir)
        .args(["validate", "--session-token", "token"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_validate_requires_credentials() {
    let dir = tempfile::tempdir().unwrap();

    growth(&dir)
        .args(["validate", "--products-stream", "growth/products", "--streams-stream", "growth/streams"])
        .assert()
        .failure();
}

#[test]
fn test_validate_accepts_flags_and_env() {
    let dir = tempfile::tempdir().unwrap();

    growth(&dir)
        .args(["validate", "--products-stream", "growth/products", "--pacing", "5ms"])
        .env("STREAMR_GROWTH_STREAMS_STREAM_ID", "growth/streams")
        .env(
            "STREAMR_PRIVATE_KEY",
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Sink: signed"))
        .stdout(predicate::str::contains("Pacing: 5ms"));
}

#[test]
fn test_validate_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("growth.toml");
    std::fs::write(
        &path,
        r#"
[destinations]
products = "growth/products"
streams = "growth/streams"

[sink]
type = "file"
dir = "snapshots"
"#,
    )
    .unwrap();

    growth(&dir)
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sink: file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_prints_snapshots() {
    let server = MockCatalog::demo().spawn().await.unwrap();
    let base = server.base_url();
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let report_path = out.path().join("report.md");
    let markdown_arg = report_path.clone();

    let output = tokio::task::spawn_blocking(move || {
        growth(&dir)
            .args([
                "run",
                "--dry-run",
                "--quiet",
                "--api-base",
                base.as_str(),
                "--products-stream",
                "growth/products",
                "--streams-stream",
                "growth/streams",
                "--output-markdown",
            ])
            .arg(&markdown_arg)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["destination"], "growth/products");
    assert_eq!(
        lines[0]["payload"],
        json!({"total": 3, "isDataUnion": 2, "isNormal": 1, "isFree": 2, "isNotFree": 1})
    );
    assert_eq!(lines[1]["destination"], "growth/streams");
    assert_eq!(lines[1]["payload"]["total"], 4);
    assert_eq!(lines[1]["payload"]["isNotFree"], 1);

    // Dry runs never reach the publish endpoint.
    assert!(server.handles().published().await.is_empty());

    let markdown = std::fs::read_to_string(&report_path).unwrap();
    assert!(markdown.starts_with("# Catalog Growth Report"));
    assert!(markdown.contains("| isDataUnion | 2 |"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_command_lists_catalog() {
    let server = MockCatalog::demo().spawn().await.unwrap();
    let base = server.base_url();
    let dir = tempfile::tempdir().unwrap();

    let output = tokio::task::spawn_blocking(move || {
        growth(&dir)
            .args(["products", "--quiet", "--api-base", base.as_str()])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("total"))
        .stdout(predicate::str::contains("isDataUnion  2"));

    assert_eq!(server.handles().requests().await, vec!["GET /products".to_string()]);
}
