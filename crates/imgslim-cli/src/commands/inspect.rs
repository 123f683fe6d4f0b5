use std::path::Path;
use std::process::ExitCode;

use imgslim_core::ImageRef;
use imgslim_engine::DockerClient;

pub async fn inspect(config_path: Option<&Path>, image: &str) -> anyhow::Result<ExitCode> {
    let config = super::load_config(config_path)?;
    let image = ImageRef::new(image)?;

    let client = DockerClient::new(&config.engine.binary, &config.timeouts);
    let size = client.inspect_size(&image).await?;

    println!(
        "{image}: {mb:.2}MB ({bytes} bytes)",
        mb = size.megabytes(),
        bytes = size.bytes
    );
    Ok(ExitCode::SUCCESS)
}
