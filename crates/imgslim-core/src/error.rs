use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("threshold must be a positive number of megabytes, got {0}")]
    InvalidThreshold(f64),

    #[error("invalid [build] config: {0}")]
    InvalidBuildConfig(&'static str),

    #[error("[timeouts].{0} must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("invalid image reference {reference:?}: {reason}")]
    InvalidImageRef {
        reference: String,
        reason: &'static str,
    },

    #[error("no image to check — pass --image or set [image].name in imgslim.toml")]
    NoImageConfigured,

    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("[mail].{0} not set in imgslim.toml — required when mail is enabled")]
    MissingMailField(&'static str),
}
