use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn approval() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_approval"));
    cmd.env_remove("APPROVAL_APPROVERS")
        .env_remove("APPROVAL_ITEM_STATE")
        .env_remove("RUST_LOG");
    cmd
}

fn comments_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

const GITHUB_COMMENTS: &str = r#"[
    {"id": 1, "body": "not approval or denial", "user": {"login": "login1"}},
    {"id": 2, "body": "Approved", "user": {"login": "login2"}},
    {"id": 3, "body": "LGTM!", "user": {"login": "login1"}}
]"#;

#[test]
fn test_evaluate_approved_from_file() {
    let file = comments_file(GITHUB_COMMENTS);
    let output = approval()
        .args(["evaluate", "--approver", "login1", "--approver", "login2"])
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "approved");
}

#[test]
fn test_evaluate_pending_exit_code() {
    let file = comments_file(r#"[{"author": "login1", "body": "Approved"}]"#);
    let output = approval()
        .args(["evaluate", "--approver", "login1", "--approver", "login2"])
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "pending");
}

#[test]
fn test_evaluate_closed_pending_is_denied() {
    let file = comments_file(r#"[{"author": "login1", "body": "Approved"}]"#);
    let output = approval()
        .args(["evaluate", "--state", "closed"])
        .arg("--comments")
        .arg(file.path())
        .env("APPROVAL_APPROVERS", "login1, login2")
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stdout(&output), "denied");
}

#[test]
fn test_evaluate_reads_stdin_and_env_state() {
    let mut child = approval()
        .args(["evaluate", "--approver", "login1", "--format", "json"])
        .env("APPROVAL_ITEM_STATE", "closed")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn approval");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(br#"[{"author": "login1", "body": "Denied."}]"#)
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait on approval");
    assert_eq!(output.status.code(), Some(3));

    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Output should be JSON");
    assert_eq!(report["decision"], "denied");
    assert_eq!(report["item_state"], "closed");
    assert_eq!(report["signals"]["login1"], "denied");
}

#[test]
fn test_evaluate_without_approvers_fails() {
    let file = comments_file("[]");
    let output = approval()
        .arg("evaluate")
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No approvers configured"));
}

#[test]
fn test_evaluate_invalid_json_fails() {
    let file = comments_file("{not json");
    let output = approval()
        .args(["evaluate", "--approver", "login1"])
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_evaluate_unrecognized_record_fails() {
    let file = comments_file(
        r#"[
            {"author": "login1", "body": "Approved"},
            {"author": "login2", "body": "Approved"},
            {"login": "login2", "body": "deny"}
        ]"#,
    );
    let output = approval()
        .args(["evaluate", "--approver", "login1", "--approver", "login2"])
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_evaluate_malformed_body_is_undetermined() {
    let file = comments_file(r#"[{"author": "login1", "body": "yes\u0000"}]"#);
    let output = approval()
        .args(["evaluate", "--approver", "login1"])
        .arg("--comments")
        .arg(file.path())
        .output()
        .expect("Failed to run approval");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_classify() {
    for (body, expected) in [
        ("Approved!", "approved"),
        ("DENY", "denied"),
        ("Approved?", "pending"),
    ] {
        let output = approval()
            .args(["classify", body])
            .output()
            .expect("Failed to run approval");
        assert!(output.status.success());
        assert_eq!(stdout(&output), expected, "classifying {body:?}");
    }
}
