use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use imgslim_core::config::{CONFIG_FILE_NAME, SMTP_PASSWORD_ENV, smtp_password_from_env};
use imgslim_core::{ImageRef, ImgslimConfig};
use imgslim_engine::DockerClient;

pub async fn doctor(config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    let mut report = DoctorReport::default();

    let config_file = config_path.unwrap_or(Path::new(CONFIG_FILE_NAME));
    let config = match super::load_config(config_path) {
        Ok(config) => {
            report.config_file = if config_file.exists() {
                CheckResult::ok(&config_file.display().to_string())
            } else {
                CheckResult::ok("Not found, using defaults")
            };
            config
        }
        Err(e) => {
            report.config_file = CheckResult::fail(&format!("{e:#}"));
            ImgslimConfig::default()
        }
    };

    let client = DockerClient::new(&config.engine.binary, &config.timeouts);
    report.engine = match client.server_version().await {
        Ok(version) => CheckResult::ok(&format!("{} {version}", config.engine.binary)),
        Err(e) => CheckResult::fail(&e.to_string()),
    };

    report.image = match config.image.name.as_deref().map(ImageRef::new) {
        Some(Ok(image)) => CheckResult::ok(&format!(
            "{image} (limit {:.0}MB)",
            config.image.threshold_mb
        )),
        Some(Err(e)) => CheckResult::fail(&e.to_string()),
        None => CheckResult::fail("[image].name not set — pass --image to check"),
    };

    report.mail = if !config.mail.enabled {
        CheckResult::ok("Disabled, alerts are logged only")
    } else {
        match (&config.mail.from, &config.mail.to) {
            (Some(from), Some(to)) => match smtp_password_from_env() {
                Ok(_) => CheckResult::ok(&format!(
                    "{from} -> {to} via {}:{}",
                    config.mail.smtp_host, config.mail.smtp_port
                )),
                Err(_) => CheckResult::fail(&format!("{SMTP_PASSWORD_ENV} not set")),
            },
            _ => CheckResult::fail("[mail].from and [mail].to must both be set"),
        }
    };

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Default)]
struct DoctorReport {
    config_file: CheckResult,
    engine: CheckResult,
    image: CheckResult,
    mail: CheckResult,
}

impl DoctorReport {
    fn all_passed(&self) -> bool {
        self.config_file.passed && self.engine.passed && self.image.passed && self.mail.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Config", &self.config_file),
            ("Engine", &self.engine),
            ("Image", &self.image),
            ("Mail", &self.mail),
        ];
        for (label, result) in rows {
            writeln!(f, "  [{}] {label:<8} {}", result.icon(), result.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
struct CheckResult {
    passed: bool,
    detail: String,
}

impl CheckResult {
    fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
