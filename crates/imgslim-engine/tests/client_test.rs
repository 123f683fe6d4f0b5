use std::path::PathBuf;
use std::time::Duration;

use imgslim_core::{ImageRef, TimeoutConfig};
use imgslim_engine::client::{
    BuildError, BuildRequest, DockerClient, ImageBuilder, ImageSizeProvider, InspectError,
};
use imgslim_engine::docker::DockerError;
use imgslim_engine::executor::DockerExecutor;
use mockall::mock;

mock! {
    Executor {}

    impl DockerExecutor for Executor {
        async fn exec(&self, args: &[String], timeout: Duration) -> Result<String, DockerError>;
        async fn exec_streaming(&self, args: &[String], timeout: Duration) -> Result<(), DockerError>;
    }
}

fn image(reference: &str) -> ImageRef {
    ImageRef::new(reference).unwrap()
}

fn args_eq(args: &[String], expected: &[&str]) -> bool {
    args.len() == expected.len() && args.iter().zip(expected).all(|(a, e)| a == e)
}

fn build_request(no_cache: bool) -> BuildRequest {
    BuildRequest {
        descriptor: PathBuf::from("./Dockerfile"),
        context_dir: PathBuf::from("."),
        tag: image("castlehoo/my-java-app:1.0_optimized"),
        no_cache,
    }
}

// ── Inspect Tests ──

#[tokio::test]
async fn inspect_parses_byte_count() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args, _| {
            args_eq(
                args,
                &[
                    "image",
                    "inspect",
                    "castlehoo/my-java-app:1.0",
                    "--format",
                    "{{.Size}}",
                ],
            )
        })
        .times(1)
        .returning(|_, _| Ok("701613260\n".to_owned()));

    let client = DockerClient::with_executor(mock);
    let size = client
        .image_size(&image("castlehoo/my-java-app:1.0"))
        .await
        .unwrap();

    assert_eq!(size.bytes, 701_613_260);
    assert!((size.megabytes() - 669.11).abs() < 0.01);
}

#[tokio::test]
async fn inspect_uses_configured_timeout() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|_, timeout| *timeout == Duration::from_secs(7))
        .times(1)
        .returning(|_, _| Ok("1048576".to_owned()));

    let timeouts = TimeoutConfig {
        inspect_secs: 7,
        ..Default::default()
    };
    let client = DockerClient::with_executor(mock).with_timeouts(&timeouts);
    let size = client.image_size(&image("app:1.0")).await.unwrap();

    assert_eq!(size.megabytes(), 1.0);
}

#[tokio::test]
async fn inspect_image_not_found() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|args, _| {
        Err(DockerError::CommandFailed {
            args: args.to_vec(),
            stderr: "Error: No such image: missing:1.0".to_owned(),
        })
    });

    let client = DockerClient::with_executor(mock);
    let result = client.image_size(&image("missing:1.0")).await;

    assert!(matches!(
        result,
        Err(InspectError::Engine {
            ref image,
            source: DockerError::CommandFailed { .. },
        }) if image.as_str() == "missing:1.0"
    ));
}

#[tokio::test]
async fn inspect_engine_not_installed() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_, _| {
        Err(DockerError::NotFound {
            binary: "docker".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });

    let client = DockerClient::with_executor(mock);
    let result = client.image_size(&image("app:1.0")).await;

    assert!(matches!(
        result,
        Err(InspectError::Engine {
            source: DockerError::NotFound { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn inspect_rejects_malformed_output() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .returning(|_, _| Ok("'701613260'\n".to_owned()));

    let client = DockerClient::with_executor(mock);
    let result = client.image_size(&image("app:1.0")).await;

    assert!(matches!(
        result,
        Err(InspectError::Malformed { ref output, .. }) if output == "'701613260'"
    ));
}

#[tokio::test]
async fn inspect_rejects_empty_output() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_, _| Ok(String::new()));

    let client = DockerClient::with_executor(mock);
    let result = client.image_size(&image("app:1.0")).await;

    assert!(matches!(result, Err(InspectError::Malformed { .. })));
}

// ── Build Tests ──

#[tokio::test]
async fn build_passes_no_cache_descriptor_and_tag() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming()
        .withf(|args, _| {
            args_eq(
                args,
                &[
                    "build",
                    "--no-cache",
                    "-f",
                    "./Dockerfile",
                    "-t",
                    "castlehoo/my-java-app:1.0_optimized",
                    ".",
                ],
            )
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let client = DockerClient::with_executor(mock);
    client.build(&build_request(true)).await.unwrap();
}

#[tokio::test]
async fn build_without_no_cache_flag() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming()
        .withf(|args, _| !args.contains(&"--no-cache".to_owned()))
        .times(1)
        .returning(|_, _| Ok(()));

    let client = DockerClient::with_executor(mock);
    client.build(&build_request(false)).await.unwrap();
}

#[tokio::test]
async fn build_uses_build_timeout() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming()
        .withf(|_, timeout| *timeout == Duration::from_secs(1800))
        .times(1)
        .returning(|_, _| Ok(()));

    let client = DockerClient::with_executor(mock);
    client.build(&build_request(true)).await.unwrap();
}

#[tokio::test]
async fn build_failure_propagates() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming().returning(|args, _| {
        Err(DockerError::CommandFailed {
            args: args.to_vec(),
            stderr: "exit status: 1".to_owned(),
        })
    });

    let client = DockerClient::with_executor(mock);
    let result = client.build(&build_request(true)).await;

    assert!(matches!(
        result,
        Err(BuildError::Build { ref tag, .. }) if tag.as_str() == "castlehoo/my-java-app:1.0_optimized"
    ));
}

#[tokio::test]
async fn build_timeout_propagates() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming().returning(|args, timeout| {
        Err(DockerError::TimedOut {
            args: args.to_vec(),
            timeout,
        })
    });

    let client = DockerClient::with_executor(mock);
    let result = client.build(&build_request(true)).await;

    assert!(matches!(
        result,
        Err(BuildError::Build {
            source: DockerError::TimedOut { .. },
            ..
        })
    ));
}

// ── Doctor Tests ──

#[tokio::test]
async fn server_version_trims_output() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args, _| args.first().map(String::as_str) == Some("version"))
        .returning(|_, _| Ok("27.3.1\n".to_owned()));

    let client = DockerClient::with_executor(mock);

    assert_eq!(client.server_version().await.unwrap(), "27.3.1");
}
