use std::process::Command;

#[test]
fn missing_required_inputs_fail_fast() {
    let output = Command::new(env!("CARGO_BIN_EXE_lookout"))
        .env_remove("INPUT_GITHUB_TOKEN")
        .env_remove("INPUT_TRIGGER_LABEL")
        .output()
        .expect("failed to run lookout");

    assert!(!output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.contains("github-token"),
        "expected the missing input to be named, got: {combined}"
    );
}

#[test]
fn invalid_severity_input_fails_fast() {
    let output = Command::new(env!("CARGO_BIN_EXE_lookout"))
        .args([
            "--pr",
            "octo/repo#1",
            "--github-token",
            "ghp_test",
            "--trigger-label",
            "ai-review",
            "--severity",
            "urgent",
        ])
        .output()
        .expect("failed to run lookout");

    assert!(!output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.contains("severity"),
        "expected a severity error, got: {combined}"
    );
}

#[test]
fn malformed_pr_reference_fails_fast() {
    let output = Command::new(env!("CARGO_BIN_EXE_lookout"))
        .args([
            "--pr",
            "not-a-reference",
            "--github-token",
            "ghp_test",
            "--trigger-label",
            "ai-review",
        ])
        .output()
        .expect("failed to run lookout");

    assert!(!output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.contains("owner/repo#number"),
        "expected the expected format in the error, got: {combined}"
    );
}
