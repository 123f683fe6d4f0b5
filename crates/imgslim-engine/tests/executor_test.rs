#![cfg(unix)]

use std::time::Duration;

use imgslim_engine::docker::DockerError;
use imgslim_engine::executor::{DockerExecutor, RealExecutor};

fn sh_args(script: &str) -> Vec<String> {
    vec!["-c".to_owned(), script.to_owned()]
}

#[tokio::test]
async fn exec_captures_stdout() {
    let executor = RealExecutor::new("sh");

    let out = executor
        .exec(&sh_args("echo 701613260"), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(out.trim(), "701613260");
}

#[tokio::test]
async fn exec_reports_stderr_on_failure() {
    let executor = RealExecutor::new("sh");

    let result = executor
        .exec(&sh_args("echo 'No such image' >&2; exit 1"), Duration::from_secs(5))
        .await;

    assert!(matches!(
        result,
        Err(DockerError::CommandFailed { ref stderr, .. }) if stderr.contains("No such image")
    ));
}

#[tokio::test]
async fn exec_missing_binary_is_not_found() {
    let executor = RealExecutor::new("imgslim-no-such-engine");

    let result = executor
        .exec(&["version".to_owned()], Duration::from_secs(5))
        .await;

    assert!(matches!(
        result,
        Err(DockerError::NotFound { ref binary, .. }) if binary == "imgslim-no-such-engine"
    ));
}

#[tokio::test]
async fn exec_non_executable_binary_is_io_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("engine");
    std::fs::write(&path, "#!/bin/sh\necho 1\n").unwrap();
    let executor = RealExecutor::new(path.to_str().unwrap());

    let result = executor
        .exec(&["version".to_owned()], Duration::from_secs(5))
        .await;

    assert!(matches!(result, Err(DockerError::Io { .. })));
}

#[tokio::test]
async fn exec_times_out() {
    let executor = RealExecutor::new("sh");

    let result = executor
        .exec(&sh_args("sleep 5"), Duration::from_millis(100))
        .await;

    assert!(matches!(result, Err(DockerError::TimedOut { .. })));
}

#[tokio::test]
async fn exec_streaming_success_and_failure() {
    let executor = RealExecutor::new("sh");

    executor
        .exec_streaming(&sh_args("exit 0"), Duration::from_secs(5))
        .await
        .unwrap();

    let result = executor
        .exec_streaming(&sh_args("exit 3"), Duration::from_secs(5))
        .await;
    assert!(matches!(result, Err(DockerError::CommandFailed { .. })));
}

#[tokio::test]
async fn exec_streaming_times_out() {
    let executor = RealExecutor::new("sh");

    let result = executor
        .exec_streaming(&sh_args("sleep 5"), Duration::from_millis(100))
        .await;

    assert!(matches!(result, Err(DockerError::TimedOut { .. })));
}
