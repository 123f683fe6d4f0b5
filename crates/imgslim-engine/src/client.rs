use std::path::{Path, PathBuf};
use std::time::Duration;

use imgslim_core::{ImageRef, ImageSize, TimeoutConfig};

use crate::docker::DockerError;
use crate::executor::{DockerExecutor, RealExecutor};

/// Reports the on-disk size of an image.
#[allow(async_fn_in_trait)]
pub trait ImageSizeProvider {
    async fn image_size(&self, image: &ImageRef) -> Result<ImageSize, InspectError>;
}

/// Builds an image from a descriptor file.
#[allow(async_fn_in_trait)]
pub trait ImageBuilder {
    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError>;
}

/// Everything the engine needs to produce one tagged image.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub descriptor: PathBuf,
    pub context_dir: PathBuf,
    pub tag: ImageRef,
    pub no_cache: bool,
}

/// Container engine operations, parameterized over the executor for testability.
pub struct DockerClient<E: DockerExecutor = RealExecutor> {
    executor: E,
    inspect_timeout: Duration,
    build_timeout: Duration,
}

impl DockerClient<RealExecutor> {
    pub fn new(binary: &str, timeouts: &TimeoutConfig) -> Self {
        Self::with_executor(RealExecutor::new(binary)).with_timeouts(timeouts)
    }
}

impl<E: DockerExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        let defaults = TimeoutConfig::default();
        Self {
            executor,
            inspect_timeout: defaults.inspect(),
            build_timeout: defaults.build(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: &TimeoutConfig) -> Self {
        self.inspect_timeout = timeouts.inspect();
        self.build_timeout = timeouts.build();
        self
    }

    // ── Inspect ──

    /// `<engine> image inspect <image> --format {{.Size}}`
    pub async fn inspect_size(&self, image: &ImageRef) -> Result<ImageSize, InspectError> {
        let output = self
            .executor
            .exec(
                &args(["image", "inspect", image.as_str(), "--format", "{{.Size}}"]),
                self.inspect_timeout,
            )
            .await
            .map_err(|e| InspectError::Engine {
                image: image.clone(),
                source: e,
            })?;

        let bytes = output
            .trim()
            .parse::<u64>()
            .map_err(|_| InspectError::Malformed {
                image: image.clone(),
                output: output.trim().to_owned(),
            })?;

        tracing::debug!(%image, bytes, "image inspected");
        Ok(ImageSize::from_bytes(bytes))
    }

    // ── Build ──

    /// `<engine> build [--no-cache] -f <descriptor> -t <tag> <context>`
    pub async fn build_image(&self, request: &BuildRequest) -> Result<(), BuildError> {
        let descriptor = path_str(&request.descriptor)?;
        let context = path_str(&request.context_dir)?;

        let mut cmd = vec!["build"];
        if request.no_cache {
            cmd.push("--no-cache");
        }
        cmd.extend(["-f", descriptor, "-t", request.tag.as_str(), context]);

        let cmd_owned: Vec<String> = cmd.iter().map(|s| (*s).to_owned()).collect();

        tracing::info!(tag = %request.tag, "building image");
        self.executor
            .exec_streaming(&cmd_owned, self.build_timeout)
            .await
            .map_err(|e| BuildError::Build {
                tag: request.tag.clone(),
                source: e,
            })
    }

    // ── Doctor ──

    /// Engine server version, used to confirm the daemon is reachable.
    pub async fn server_version(&self) -> Result<String, DockerError> {
        let output = self
            .executor
            .exec(
                &args(["version", "--format", "{{.Server.Version}}"]),
                self.inspect_timeout,
            )
            .await?;
        Ok(output.trim().to_owned())
    }
}

impl<E: DockerExecutor> ImageSizeProvider for DockerClient<E> {
    async fn image_size(&self, image: &ImageRef) -> Result<ImageSize, InspectError> {
        self.inspect_size(image).await
    }
}

impl<E: DockerExecutor> ImageBuilder for DockerClient<E> {
    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        self.build_image(request).await
    }
}

impl<T: ImageSizeProvider> ImageSizeProvider for &T {
    async fn image_size(&self, image: &ImageRef) -> Result<ImageSize, InspectError> {
        (**self).image_size(image).await
    }
}

impl<T: ImageBuilder> ImageBuilder for &T {
    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        (**self).build(request).await
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn path_str(path: &Path) -> Result<&str, BuildError> {
    path.to_str()
        .ok_or_else(|| BuildError::InvalidPath(path.to_path_buf()))
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("could not inspect image {image}")]
    Engine { image: ImageRef, source: DockerError },

    #[error("unexpected size output for image {image}: {output:?}")]
    Malformed { image: ImageRef, output: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("build of {tag} failed")]
    Build { tag: ImageRef, source: DockerError },
}
