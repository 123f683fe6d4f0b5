use std::path::Path;
use std::process::ExitCode;

use imgslim_core::config::smtp_password_from_env;
use imgslim_core::{Error, ImageRef, ImgslimConfig};
use imgslim_engine::DockerClient;
use imgslim_notify::{EmailNotifier, EmailSettings};
use imgslim_workflow::{Optimizer, Workflow};

pub struct CheckOptions {
    pub image: Option<String>,
    pub threshold: Option<f64>,
    pub no_email: bool,
    pub json: bool,
}

/// Run the size check workflow once and map its outcome to the exit code.
pub async fn check(config_path: Option<&Path>, options: CheckOptions) -> anyhow::Result<ExitCode> {
    let mut config = super::load_config(config_path)?;

    if let Some(threshold) = options.threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::InvalidThreshold(threshold).into());
        }
        config.image.threshold_mb = threshold;
    }

    let image = resolve_image(options.image.as_deref(), &config)?;
    let notifier = build_notifier(&config, options.no_email);

    let client = DockerClient::new(&config.engine.binary, &config.timeouts);
    let optimizer = Optimizer::new(&client, config.build.clone());
    let workflow = Workflow::new(&client, notifier, optimizer, config.image.threshold_mb);

    let outcome = workflow.run(image).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.is_failure() {
        eprintln!("{outcome}");
    } else {
        println!("{outcome}");
    }

    Ok(ExitCode::from(outcome.exit_code()))
}

fn resolve_image(flag: Option<&str>, config: &ImgslimConfig) -> anyhow::Result<ImageRef> {
    let reference = flag
        .or(config.image.name.as_deref())
        .ok_or(Error::NoImageConfigured)?;
    Ok(ImageRef::new(reference)?)
}

/// Mail setup problems only cost the alerts; the size check still runs.
fn build_notifier(config: &ImgslimConfig, no_email: bool) -> EmailNotifier {
    if no_email || !config.mail.enabled {
        return EmailNotifier::dry_run();
    }

    match smtp_notifier(config) {
        Ok(notifier) => notifier,
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::warn!("Email alerts unavailable, continuing without them: {reason}");
            EmailNotifier::unavailable(reason)
        }
    }
}

fn smtp_notifier(config: &ImgslimConfig) -> anyhow::Result<EmailNotifier> {
    let password = smtp_password_from_env()?;
    let settings = EmailSettings::from_config(&config.mail, password, config.timeouts.mail())?;
    Ok(EmailNotifier::new(settings)?)
}
