pub mod client;
pub mod docker;
pub mod executor;

pub use client::{
    BuildError, BuildRequest, DockerClient, ImageBuilder, ImageSizeProvider, InspectError,
};
pub use docker::DockerError;
pub use executor::{DockerExecutor, RealExecutor};
