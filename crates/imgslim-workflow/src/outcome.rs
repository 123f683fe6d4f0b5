use std::fmt;

use imgslim_core::ImageRef;
use serde::Serialize;

/// Terminal result of one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Source at or below the threshold; nothing sent, nothing built.
    WithinLimit {
        image: ImageRef,
        size_mb: f64,
        threshold_mb: f64,
    },
    /// Source rebuilt and re-measured. `still_exceeds` reports whether the
    /// rebuild is above the threshold too; no second pass is attempted.
    Optimized {
        source: ImageRef,
        source_mb: f64,
        optimized: ImageRef,
        optimized_mb: f64,
        still_exceeds: bool,
    },
    SourceInspectionFailed {
        image: ImageRef,
        reason: String,
    },
    /// The initial alert has already gone out when this is reached.
    OptimizedInspectionFailed {
        source: ImageRef,
        source_mb: f64,
        optimized: ImageRef,
        reason: String,
    },
    BuildFailed {
        source: ImageRef,
        source_mb: f64,
        reason: String,
    },
}

impl Outcome {
    /// Process exit code. 1 and 2 are left to startup and usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::WithinLimit { .. } => 0,
            Self::Optimized { .. } => 3,
            Self::SourceInspectionFailed { .. } => 4,
            Self::OptimizedInspectionFailed { .. } => 5,
            Self::BuildFailed { .. } => 6,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceInspectionFailed { .. }
                | Self::OptimizedInspectionFailed { .. }
                | Self::BuildFailed { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithinLimit {
                image,
                size_mb,
                threshold_mb,
            } => write!(
                f,
                "Image {image} is within the size limit ({size_mb:.2}MB <= {threshold_mb:.2}MB)."
            ),
            Self::Optimized {
                optimized,
                optimized_mb,
                source_mb,
                still_exceeds,
                ..
            } => {
                write!(
                    f,
                    "Optimized image {optimized} is {optimized_mb:.2}MB (was {source_mb:.2}MB)."
                )?;
                if *still_exceeds {
                    write!(f, " It is still above the limit.")?;
                }
                Ok(())
            }
            Self::SourceInspectionFailed { image, reason } => {
                write!(f, "Failed to check size of image {image}: {reason}")
            }
            Self::OptimizedInspectionFailed {
                optimized, reason, ..
            } => write!(
                f,
                "Failed to check size of optimized image {optimized}: {reason}"
            ),
            Self::BuildFailed { source, reason, .. } => {
                write!(f, "Failed to build optimized image for {source}: {reason}")
            }
        }
    }
}

/// Render an error and its `source()` chain on one line.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
