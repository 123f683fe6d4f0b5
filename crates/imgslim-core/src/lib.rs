//! Core types and configuration for imgslim.
//!
//! This crate defines the `imgslim.toml` schema ([`ImgslimConfig`]),
//! image references and size measurements ([`ImageRef`], [`ImageSize`]),
//! alert composition ([`AlertEvent`]), and shared error types.

pub mod config;
pub mod error;
pub mod image;

pub use config::{
    BuildConfig, EngineConfig, ImageConfig, ImgslimConfig, MailConfig, TimeoutConfig,
};
pub use error::{Error, Result};
pub use image::{AlertEvent, ImageRef, ImageSize, OPTIMIZED_SUFFIX, SizeMeasurement, Stage};
