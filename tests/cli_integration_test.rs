mod common;

use assert_cmd::Command;
use common::{chat_completion_body, StubEndpoint};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::process::Stdio;
use tempfile::TempDir;

fn code_assist() -> Command {
    let mut cmd = Command::cargo_bin("code-assist").unwrap();
    cmd.env_remove("HF_API_TOKEN")
        .env_remove("CODE_ASSIST_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_analyze_from_stdin_outputs_json() {
    let output = code_assist()
        .arg("analyze")
        .write_stdin("def a():\n    return 1\n\ndef b():\n    return 1\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["refactors"][0]["symbol"], "a & b");
    assert_eq!(value["findings"], serde_json::json!([]));
}

#[test]
fn test_analyze_file_text_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippet.py");
    fs::write(&path, "print(x)\n").unwrap();

    let output = code_assist()
        .args(["analyze", "--format", "text"])
        .arg(&path)
        .env("NO_COLOR", "1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Prefer `logging` over bare `print`"));
    assert!(stdout.contains("General"));
}

#[test]
fn test_analyze_missing_file_fails() {
    code_assist()
        .args(["analyze", "/definitely/not/here.py"])
        .assert()
        .failure();
}

#[test]
fn test_health() {
    let output = code_assist().arg("health").output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({"ok": true}));
}

#[test]
fn test_infer_without_token_fails_fast() {
    let dir = TempDir::new().unwrap();
    let output = code_assist()
        .current_dir(dir.path())
        .args(["infer", "--prompt", "hello"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("HF_API_TOKEN not configured"));
}

#[test]
fn test_explicit_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[cache]\nmax_items = 0\n").unwrap();

    code_assist()
        .arg("--config")
        .arg(&config)
        .args(["infer", "--prompt", "hello"])
        .assert()
        .failure();
}

#[test]
fn test_serve_without_token_answers_each_line() {
    let dir = TempDir::new().unwrap();
    let input = concat!(
        "{\"id\":1,\"op\":\"infer\",\"prompt\":\"p\"}\n",
        "{\"id\":2,\"op\":\"infer\",\"prompt\":\"p\"}\n",
        "{\"id\":3,\"op\":\"analyze\",\"code\":\"\"}\n",
        "not json\n",
    );

    let output = code_assist()
        .current_dir(dir.path())
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let replies: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 4);

    for id in [1, 2] {
        let reply = replies.iter().find(|r| r["id"] == id).unwrap();
        assert_eq!(reply["ok"], false);
        assert!(reply["error"]
            .as_str()
            .unwrap()
            .contains("HF_API_TOKEN not configured"));
    }
    let analyzed = replies.iter().find(|r| r["id"] == 3).unwrap();
    assert_eq!(analyzed["result"]["formatted"], "\n");
    assert_eq!(replies.iter().filter(|r| r["ok"] == false).count(), 3);
}

#[test]
fn test_serve_repeated_infer_hits_cache() {
    let endpoint = StubEndpoint::start(vec![(200, chat_completion_body("from the model"))]);
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("serve.toml");
    fs::write(
        &config,
        format!(
            "[gateway]\nendpoint = \"{}\"\ntimeout_seconds = 5\n",
            endpoint.url
        ),
    )
    .unwrap();

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_code-assist"))
        .arg("--config")
        .arg(&config)
        .arg("serve")
        .env("HF_API_TOKEN", "test-token")
        .env_remove("CODE_ASSIST_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut request = |line: &str| -> serde_json::Value {
        writeln!(stdin, "{line}").unwrap();
        stdin.flush().unwrap();
        let mut reply = String::new();
        stdout.read_line(&mut reply).unwrap();
        serde_json::from_str(&reply).unwrap()
    };

    // Each request waits for its reply, so the second one starts after the first was cached
    let first = request(r#"{"id":1,"op":"infer","prompt":"same"}"#);
    let second = request(r#"{"id":2,"op":"infer","prompt":"same"}"#);
    let stats = request(r#"{"id":3,"op":"stats"}"#);

    drop(request);
    drop(stdin);
    assert!(child.wait().unwrap().success());

    assert_eq!(first["result"]["text"], "from the model");
    assert_eq!(second["result"]["text"], "from the model");
    assert_eq!(stats["result"]["hits"], 1);
    assert_eq!(stats["result"]["misses"], 1);
    assert_eq!(endpoint.requests(), 1);
}
