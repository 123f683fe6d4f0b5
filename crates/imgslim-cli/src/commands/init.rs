use std::path::Path;
use std::process::ExitCode;

use imgslim_core::config::{CONFIG_FILE_NAME, SMTP_PASSWORD_ENV};

/// Write a starter config and `.env.example` into the current directory.
pub fn init() -> anyhow::Result<ExitCode> {
    let mut created = Vec::new();

    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        eprintln!("{CONFIG_FILE_NAME} already exists, skipping");
    } else {
        let config_toml = r#"[image]
# name = "castlehoo/my-java-app:1.0"
# threshold_mb = 500

[engine]
# binary = "docker"

[build]
# builder_image = "openjdk:17"
# runtime_image = "openjdk:17-jdk-slim"
# entry_point = "Main"
# descriptor_file = "Dockerfile"

[mail]
# smtp_host = "smtp.gmail.com"
# smtp_port = 587
# from = "you@example.com"
# to = "you@example.com"

[timeouts]
# inspect_secs = 30
# build_secs = 1800
# mail_secs = 30
"#;
        std::fs::write(config_path, config_toml)?;
        created.push(CONFIG_FILE_NAME);
    }

    let env_example_path = Path::new(".env.example");
    if env_example_path.exists() {
        eprintln!(".env.example already exists, skipping");
    } else {
        std::fs::write(env_example_path, format!("{SMTP_PASSWORD_ENV}=your-app-password\n"))?;
        created.push(".env.example");
    }

    if created.is_empty() {
        println!("Nothing to create — already initialized.");
    } else {
        for f in &created {
            println!("Created {f}");
        }
    }

    println!();
    println!("Next steps:");
    println!();
    println!("  1. Set [image].name and the [mail] addresses in {CONFIG_FILE_NAME}");
    println!();
    println!("  2. Configure the SMTP password:");
    println!("     cp .env.example .env");
    println!();
    println!("  3. Verify the setup:");
    println!("     imgslim doctor");
    println!();
    println!("  4. Run a check:");
    println!("     imgslim check");

    Ok(ExitCode::SUCCESS)
}
