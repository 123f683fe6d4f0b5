use imgslim_build::{DescriptorError, DescriptorGenerator, write_descriptor};
use imgslim_core::{BuildConfig, ImageRef};
use imgslim_engine::{BuildError, BuildRequest, ImageBuilder};

/// Rebuilds a source image from the fixed multi-stage descriptor.
pub struct Optimizer<B: ImageBuilder> {
    builder: B,
    config: BuildConfig,
}

impl<B: ImageBuilder> Optimizer<B> {
    pub fn new(builder: B, config: BuildConfig) -> Self {
        Self { builder, config }
    }

    /// Write the descriptor, then build it as `<source>_optimized`.
    ///
    /// Returns the tag of the new image.
    pub async fn optimize(&self, source: &ImageRef) -> Result<ImageRef, OptimizeError> {
        tracing::info!(%source, "Optimizing the image using multi-stage build");

        let descriptor = self.config.descriptor_path();
        let content = DescriptorGenerator::new(&self.config).render();
        write_descriptor(&descriptor, &content)
            .map_err(|e| OptimizeError::Descriptor { source: e })?;

        let request = BuildRequest {
            descriptor,
            context_dir: self.config.context_dir.clone(),
            tag: source.optimized(),
            no_cache: self.config.no_cache,
        };
        self.builder
            .build(&request)
            .await
            .map_err(|e| OptimizeError::Build { source: e })?;

        Ok(request.tag)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("could not write build descriptor")]
    Descriptor { source: DescriptorError },

    #[error("optimized image build failed")]
    Build { source: BuildError },
}
