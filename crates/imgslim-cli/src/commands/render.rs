use std::path::Path;
use std::process::ExitCode;

use imgslim_build::{DescriptorGenerator, write_descriptor};

pub fn render(config_path: Option<&Path>, write: bool) -> anyhow::Result<ExitCode> {
    let config = super::load_config(config_path)?;
    let descriptor = DescriptorGenerator::new(&config.build).render();

    if write {
        let path = config.build.descriptor_path();
        write_descriptor(&path, &descriptor)?;
        println!("Wrote build descriptor to {}", path.display());
    } else {
        print!("{descriptor}");
    }

    Ok(ExitCode::SUCCESS)
}
