use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "imgslim.toml";

/// Environment variable holding the SMTP password.
pub const SMTP_PASSWORD_ENV: &str = "IMGSLIM_SMTP_PASSWORD";

/// imgslim.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImgslimConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Source image reference to check (can be overridden with `--image`)
    pub name: Option<String>,
    /// Alert threshold in binary megabytes
    #[serde(default = "default_threshold_mb")]
    pub threshold_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Container engine CLI (docker, podman, ...)
    #[serde(default = "default_engine_binary")]
    pub binary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Image for the compile stage
    #[serde(default = "default_builder_image")]
    pub builder_image: String,
    /// Image for the runtime stage
    #[serde(default = "default_runtime_image")]
    pub runtime_image: String,
    /// Entry point class; `<entry_point>.java` is compiled in the build stage
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    /// Build context directory
    #[serde(default = "default_context_dir")]
    pub context_dir: PathBuf,
    /// Descriptor file name, relative to `context_dir`. Overwritten on every run.
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,
    /// Pass `--no-cache` to the build
    #[serde(default = "default_true")]
    pub no_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// When false, alerts are only logged
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP username
    pub from: Option<String>,
    /// Recipient address
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_inspect_secs")]
    pub inspect_secs: u64,
    #[serde(default = "default_build_secs")]
    pub build_secs: u64,
    #[serde(default = "default_mail_secs")]
    pub mail_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            name: None,
            threshold_mb: default_threshold_mb(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            builder_image: default_builder_image(),
            runtime_image: default_runtime_image(),
            entry_point: default_entry_point(),
            context_dir: default_context_dir(),
            descriptor_file: default_descriptor_file(),
            no_cache: true,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            from: None,
            to: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            inspect_secs: default_inspect_secs(),
            build_secs: default_build_secs(),
            mail_secs: default_mail_secs(),
        }
    }
}

impl ImgslimConfig {
    /// Load from imgslim.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        let threshold = self.image.threshold_mb;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(crate::Error::InvalidThreshold(threshold));
        }
        if self.build.entry_point.trim().is_empty() {
            return Err(crate::Error::InvalidBuildConfig("entry_point must not be empty"));
        }
        if self.build.descriptor_file.trim().is_empty() {
            return Err(crate::Error::InvalidBuildConfig(
                "descriptor_file must not be empty",
            ));
        }
        let timeouts = [
            ("inspect_secs", self.timeouts.inspect_secs),
            ("build_secs", self.timeouts.build_secs),
            ("mail_secs", self.timeouts.mail_secs),
        ];
        if let Some((field, _)) = timeouts.into_iter().find(|(_, secs)| *secs == 0) {
            return Err(crate::Error::InvalidTimeout(field));
        }
        Ok(())
    }
}

impl BuildConfig {
    /// Full path of the build descriptor file.
    pub fn descriptor_path(&self) -> PathBuf {
        self.context_dir.join(&self.descriptor_file)
    }
}

impl TimeoutConfig {
    pub fn inspect(&self) -> Duration {
        Duration::from_secs(self.inspect_secs)
    }

    pub fn build(&self) -> Duration {
        Duration::from_secs(self.build_secs)
    }

    pub fn mail(&self) -> Duration {
        Duration::from_secs(self.mail_secs)
    }
}

/// Read the SMTP password from the environment, loading `.env` first if present.
pub fn smtp_password_from_env() -> crate::Result<SecretString> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    tracing::debug!(dotenv = dotenv_loaded, "loading SMTP credential");

    std::env::var(SMTP_PASSWORD_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| crate::Error::MissingEnvVar(SMTP_PASSWORD_ENV.to_owned()))
}

fn default_threshold_mb() -> f64 {
    500.0
}

fn default_engine_binary() -> String {
    "docker".to_owned()
}

fn default_builder_image() -> String {
    "openjdk:17".to_owned()
}

fn default_runtime_image() -> String {
    "openjdk:17-jdk-slim".to_owned()
}

fn default_entry_point() -> String {
    "Main".to_owned()
}

fn default_context_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_descriptor_file() -> String {
    "Dockerfile".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_inspect_secs() -> u64 {
    30
}

fn default_build_secs() -> u64 {
    1800
}

fn default_mail_secs() -> u64 {
    30
}
