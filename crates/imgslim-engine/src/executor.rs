use std::process::Stdio;
use std::time::Duration;

use crate::docker::DockerError;

/// Abstraction over container engine CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
/// Every call is bounded by `timeout`; the child process is killed when it
/// expires.
#[allow(async_fn_in_trait)]
pub trait DockerExecutor: Send + Sync {
    /// Execute an engine command and capture stdout.
    async fn exec(&self, args: &[String], timeout: Duration) -> Result<String, DockerError>;

    /// Execute an engine command, streaming its output to stderr.
    async fn exec_streaming(&self, args: &[String], timeout: Duration) -> Result<(), DockerError>;
}

/// Real engine CLI executor.
pub struct RealExecutor {
    binary: String,
}

impl RealExecutor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, args: &[String]) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.args(args).kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> DockerError {
        let binary = self.binary.clone();
        if source.kind() == std::io::ErrorKind::NotFound {
            DockerError::NotFound { binary, source }
        } else {
            DockerError::Io { binary, source }
        }
    }

    fn wait_error(&self, source: std::io::Error) -> DockerError {
        DockerError::Io {
            binary: self.binary.clone(),
            source,
        }
    }
}

impl DockerExecutor for RealExecutor {
    async fn exec(&self, args: &[String], timeout: Duration) -> Result<String, DockerError> {
        tracing::debug!(binary = %self.binary, ?args, "exec");

        let mut cmd = self.command(args);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| DockerError::TimedOut {
                args: args.to_vec(),
                timeout,
            })?
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| DockerError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(DockerError::CommandFailed {
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, args: &[String], timeout: Duration) -> Result<(), DockerError> {
        tracing::debug!(binary = %self.binary, ?args, "exec (streaming)");

        let mut child = self
            .command(args)
            .stdout(Stdio::from(std::io::stderr()))
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => status.map_err(|e| self.wait_error(e))?,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "failed to kill timed-out engine process");
                }
                return Err(DockerError::TimedOut {
                    args: args.to_vec(),
                    timeout,
                });
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(DockerError::CommandFailed {
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }
}
