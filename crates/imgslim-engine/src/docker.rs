use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("container engine CLI `{binary}` not found — install docker or set [engine].binary")]
    NotFound {
        binary: String,
        source: std::io::Error,
    },

    #[error("could not run container engine CLI `{binary}`")]
    Io {
        binary: String,
        source: std::io::Error,
    },

    #[error("engine command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("engine command timed out after {}s: {args:?}", timeout.as_secs())]
    TimedOut { args: Vec<String>, timeout: Duration },

    #[error("engine output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}
