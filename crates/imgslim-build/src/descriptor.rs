use std::path::{Path, PathBuf};

/// Writes the build descriptor to `path`, replacing any previous content.
///
/// The parent directory must already exist; it is the build context.
pub fn write_descriptor(path: &Path, content: &str) -> Result<(), DescriptorError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "overwriting existing build descriptor");
    }

    std::fs::write(path, content).map_err(|e| DescriptorError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), bytes = content.len(), "build descriptor written");
    Ok(())
}

/// Load a previously written build descriptor.
pub fn load_descriptor(path: &Path) -> Result<String, DescriptorError> {
    std::fs::read_to_string(path).map_err(|e| DescriptorError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("failed to write build descriptor {path}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to read build descriptor {path}")]
    Read { path: PathBuf, source: std::io::Error },
}
