use std::fmt;

use serde::Serialize;

/// Suffix appended to a source image reference to name its optimized rebuild.
pub const OPTIMIZED_SUFFIX: &str = "_optimized";

const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// Container image reference (repository + tag), e.g. `castlehoo/my-java-app:1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> crate::Result<Self> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(crate::Error::InvalidImageRef {
                reference,
                reason: "must not be empty",
            });
        }
        if reference.starts_with('-') {
            return Err(crate::Error::InvalidImageRef {
                reference,
                reason: "must not start with '-'",
            });
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(crate::Error::InvalidImageRef {
                reference,
                reason: "must not contain whitespace",
            });
        }
        Ok(Self(reference))
    }

    /// The reference the optimizer tags its rebuild with.
    pub fn optimized(&self) -> Self {
        Self(format!("{}{OPTIMIZED_SUFFIX}", self.0))
    }

    pub fn is_optimized(&self) -> bool {
        self.0.ends_with(OPTIMIZED_SUFFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ImageRef {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// On-disk size of an image as reported by the container engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ImageSize {
    pub bytes: u64,
}

impl ImageSize {
    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    /// Size in binary megabytes (MiB).
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / BYTES_PER_MEGABYTE
    }
}

/// One size observation of one image. Never cached; every inspection
/// produces a fresh measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeMeasurement {
    pub image: ImageRef,
    pub size: ImageSize,
}

impl SizeMeasurement {
    pub fn megabytes(&self) -> f64 {
        self.size.megabytes()
    }

    pub fn exceeds(&self, threshold_mb: f64) -> bool {
        self.megabytes() > threshold_mb
    }
}

/// Lifecycle stage an alert is raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Initial,
    Optimized,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Optimized => "optimized",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Optimized => "Optimized",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A size alert for one image at one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub image: ImageRef,
    pub size_mb: f64,
    pub stage: Stage,
}

impl AlertEvent {
    pub fn new(measurement: &SizeMeasurement, stage: Stage) -> Self {
        Self {
            image: measurement.image.clone(),
            size_mb: measurement.megabytes(),
            stage,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "Alert: Docker Image {image} Size {stage}",
            image = self.image,
            stage = self.stage.title()
        )
    }

    pub fn body(&self) -> String {
        let mut body = format!(
            "Warning: Docker image {image} is {size:.2}MB.",
            image = self.image,
            size = self.size_mb
        );
        if self.stage == Stage::Optimized {
            body.push_str("\nThe image was optimized and the current size is below the limit.");
        }
        body
    }
}
