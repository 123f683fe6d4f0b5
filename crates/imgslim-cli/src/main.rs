mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "imgslim",
    about = "Keep container images under a size limit: check, alert, rebuild"
)]
#[command(version)]
struct Cli {
    /// Path to the config file (default: ./imgslim.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an image against the size limit; alert and rebuild it when over
    Check {
        /// Image to check (overrides [image].name)
        #[arg(long, env = "IMGSLIM_IMAGE")]
        image: Option<String>,
        /// Size limit in MB (overrides [image].threshold_mb)
        #[arg(long)]
        threshold: Option<f64>,
        /// Log alerts instead of emailing them
        #[arg(long)]
        no_email: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the size of one image
    Inspect {
        /// Image reference
        image: String,
    },
    /// Print the multi-stage build descriptor
    Render {
        /// Write it to [build].descriptor_file instead of stdout
        #[arg(long)]
        write: bool,
    },
    /// Create imgslim.toml and .env.example in the current directory
    Init,
    /// Check container engine, config, and mail setup
    Doctor,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let code = match cli.command {
        Commands::Check {
            image,
            threshold,
            no_email,
            json,
        } => {
            let options = commands::CheckOptions {
                image,
                threshold,
                no_email,
                json,
            };
            commands::check(config, options).await?
        }
        Commands::Inspect { image } => commands::inspect(config, &image).await?,
        Commands::Render { write } => commands::render(config, write)?,
        Commands::Init => commands::init()?,
        Commands::Doctor => commands::doctor(config).await?,
    };

    Ok(code)
}
