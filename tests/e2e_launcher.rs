// xltemplates - tests/e2e_launcher.rs
//
// End-to-end tests for child-process supervision: real processes, real exit
// statuses. Unix-only where a shell is needed.

use std::path::{Path, PathBuf};
use std::process::Command;
use xltemplates::app::launcher::{exit_code, run, run_server};
use xltemplates::util::error::LaunchError;

#[cfg(unix)]
fn sh(script: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(script);
    command
}

#[cfg(unix)]
#[test]
fn e2e_child_success_is_exit_code_zero() {
    let result = run(sh("exit 0"));
    assert!(result.is_ok(), "got {result:?}");
    assert_eq!(exit_code(&result), 0);
}

#[cfg(unix)]
#[test]
fn e2e_child_failure_is_exited_and_code_one() {
    let result = run(sh("exit 3"));
    match &result {
        Err(LaunchError::Exited { status, .. }) => assert_eq!(status.code(), Some(3)),
        other => panic!("expected Exited, got {other:?}"),
    }
    assert_eq!(exit_code(&result), 1);
}

#[test]
fn e2e_missing_server_is_spawn_error_and_code_one() {
    let program: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("no-such-dir")
        .join("xltemplates-missing");
    let result = run_server(&program, 8501);
    match &result {
        Err(LaunchError::Spawn { program: p, .. }) => assert_eq!(p, &program),
        other => panic!("expected Spawn, got {other:?}"),
    }
    assert_eq!(exit_code(&result), 1);
}

/// The launcher binary itself exits 1 when the server cannot be started,
/// even with an unusable port argument.
#[test]
fn e2e_launcher_binary_reports_failure() {
    let status = Command::new(env!("CARGO_BIN_EXE_xltemplates-launch"))
        .arg("abc")
        .arg("--server-bin")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-server"))
        .status()
        .expect("run launcher");
    assert_eq!(status.code(), Some(1));
}
