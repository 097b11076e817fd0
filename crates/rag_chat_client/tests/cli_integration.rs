//! Integration tests for the rag-chat binary. Uses assert_cmd to run the
//! binary, a real temp config, and an in-process HTTP backend. No mocks.

use assert_cmd::Command;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::json;
use std::io::Write as _;
use std::net::TcpListener as StdTcpListener;

/// Pick a free port by binding to :0 and extracting the assigned port.
fn free_port() -> u16 {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Write a minimal YAML config to a temp file pointing at `port`.
fn write_config(dir: &tempfile::TempDir, port: u16) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        "api:\n  base_url: http://127.0.0.1:{}/api\n  timeout_secs: 5",
        port
    )
    .unwrap();
    path
}

/// Spawn an in-process backend serving chat and stats on `port`.
/// Returns a join handle; the server runs until the test process exits.
fn spawn_test_backend(port: u16) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let api = Router::new()
                .route(
                    "/chat",
                    post(|| async {
                        Json(json!({
                            "status": "success",
                            "data": {
                                "answer": "Puxian is spoken in Putian.",
                                "sources": [
                                    { "text": "intro.md: regional overview", "metadata": {} }
                                ],
                                "tokens_used": 9
                            }
                        }))
                    }),
                )
                .route(
                    "/stats",
                    get(|| async {
                        Json(json!({
                            "status": "success",
                            "data": { "total_documents": 42, "vectorstore_path": "/data/vs" }
                        }))
                    }),
                );
            let app = Router::new().nest("/api", api);
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
                .await
                .unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn cli_prints_answer_and_sources() {
    let port = free_port();
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, port);

    let _server = spawn_test_backend(port);
    std::thread::sleep(std::time::Duration::from_millis(100));

    // Question as positional arguments.
    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("where is Puxian spoken?");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Puxian is spoken in Putian."))
        .stdout(predicate::str::contains("Sources:"))
        .stdout(predicate::str::contains("intro.md"));
}

#[test]
fn cli_reads_question_from_stdin() {
    let port = free_port();
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, port);

    let _server = spawn_test_backend(port);
    std::thread::sleep(std::time::Duration::from_millis(100));

    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .write_stdin("where is Puxian spoken?\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Puxian is spoken in Putian."));
}

#[test]
fn cli_with_config_env_var() {
    let port = free_port();
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, port);

    let _server = spawn_test_backend(port);
    std::thread::sleep(std::time::Duration::from_millis(100));

    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.env("RAG_CHAT_CONFIG", &config_path)
        .arg("stats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Documents: 42"))
        .stdout(predicate::str::contains("/data/vs"));
}

#[test]
fn cli_backend_down_shows_error() {
    // Point the config at a port where nothing is listening.
    let port = free_port();
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, port);

    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .write_stdin("hello\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::is_match("(?i)(connect|error|refused|transport)").unwrap());
}

#[test]
fn cli_delete_rejects_path_delimiters_without_a_backend() {
    let dir = tempfile::tempdir().unwrap();
    // Any backend address works: validation fails before a request is made.
    let config_path = write_config(&dir, 1);

    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("delete")
        .arg("../etc/passwd");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid filename"));
}

#[test]
fn cli_missing_operand_exits_one_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    // Any backend address works: the usage check fires before any request.
    let config_path = write_config(&dir, 1);

    let mut cmd = Command::cargo_bin("rag-chat").unwrap();
    cmd.arg("--config").arg(&config_path).arg("upload");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}
