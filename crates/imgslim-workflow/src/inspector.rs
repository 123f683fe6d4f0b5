use imgslim_core::{ImageRef, SizeMeasurement};
use imgslim_engine::{ImageSizeProvider, InspectError};

/// Turns raw engine size reports into [`SizeMeasurement`]s.
pub struct SizeInspector<P: ImageSizeProvider> {
    provider: P,
}

impl<P: ImageSizeProvider> SizeInspector<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Measure `image` now. Nothing is cached between calls.
    pub async fn measure(&self, image: &ImageRef) -> Result<SizeMeasurement, InspectError> {
        let size = self.provider.image_size(image).await?;
        let measurement = SizeMeasurement {
            image: image.clone(),
            size,
        };
        tracing::info!(
            %image,
            bytes = size.bytes,
            "Image {image} is {:.2}MB",
            measurement.megabytes()
        );
        Ok(measurement)
    }
}
