mod check;
mod doctor;
mod init;
mod inspect;
mod render;

use std::path::Path;

use imgslim_core::ImgslimConfig;

pub use check::{CheckOptions, check};
pub use doctor::doctor;
pub use init::init;
pub use inspect::inspect;
pub use render::render;

/// Load config from `--config`, or from ./imgslim.toml with defaults if absent.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<ImgslimConfig> {
    let config = match path {
        Some(path) => ImgslimConfig::load_from(path)?,
        None => ImgslimConfig::load(Path::new("."))?,
    };
    Ok(config)
}
