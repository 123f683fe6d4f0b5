use std::fmt;
use std::time::Duration;

use imgslim_core::{AlertEvent, MailConfig};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::error::NotifyError;

/// Delivers size alerts. One attempt per call, no retry.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, alert: &AlertEvent) -> Result<(), NotifyError>;
}

/// SMTP connection settings for [`EmailNotifier`].
///
/// The password is held in a [`SecretString`] and redacted from `Debug`.
#[derive(Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from: String,
    pub to: String,
    pub password: SecretString,
    pub timeout: Duration,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailSettings {
    /// Combine `[mail]` config with the externally supplied password.
    pub fn from_config(
        config: &MailConfig,
        password: SecretString,
        timeout: Duration,
    ) -> imgslim_core::Result<Self> {
        let from = config
            .from
            .clone()
            .ok_or(imgslim_core::Error::MissingMailField("from"))?;
        let to = config
            .to
            .clone()
            .ok_or(imgslim_core::Error::MissingMailField("to"))?;

        Ok(Self {
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            from,
            to,
            password,
            timeout,
        })
    }
}

struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

enum Delivery {
    Smtp(SmtpMailer),
    DryRun,
    Unavailable(String),
}

/// Email notifier. In dry-run mode alerts are only logged; when SMTP could
/// not be configured every alert fails with [`NotifyError::Unavailable`].
pub struct EmailNotifier {
    delivery: Delivery,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Result<Self, NotifyError> {
        let from = parse_mailbox("from", &settings.from)?;
        let to = parse_mailbox("to", &settings.to)?;

        // Sender address doubles as the SMTP login.
        let creds = Credentials::new(
            settings.from.clone(),
            settings.password.expose_secret().to_owned(),
        );

        let tls_parameters = TlsParameters::builder(settings.smtp_host.clone())
            .build()
            .map_err(|e| NotifyError::Transport {
                host: settings.smtp_host.clone(),
                source: e,
            })?;

        info!(
            "Configuring SMTP transport for {}:{} with STARTTLS",
            settings.smtp_host, settings.smtp_port
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(|e| NotifyError::Transport {
                host: settings.smtp_host.clone(),
                source: e,
            })?
            .port(settings.smtp_port)
            .credentials(creds)
            .tls(Tls::Required(tls_parameters))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            delivery: Delivery::Smtp(SmtpMailer {
                transport,
                from,
                to,
            }),
        })
    }

    /// A notifier that logs alerts instead of sending them.
    pub fn dry_run() -> Self {
        warn!("Email notifier running in DRY RUN mode - alerts will only be logged");
        Self {
            delivery: Delivery::DryRun,
        }
    }

    /// A notifier whose every alert fails with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            delivery: Delivery::Unavailable(reason.into()),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self.delivery, Delivery::DryRun)
    }
}

impl Notifier for EmailNotifier {
    async fn notify(&self, alert: &AlertEvent) -> Result<(), NotifyError> {
        let mailer = match &self.delivery {
            Delivery::Smtp(mailer) => mailer,
            Delivery::DryRun => {
                info!(
                    subject = %alert.subject(),
                    body = %alert.body(),
                    "dry run: alert not sent"
                );
                return Ok(());
            }
            Delivery::Unavailable(reason) => {
                return Err(NotifyError::Unavailable {
                    reason: reason.clone(),
                });
            }
        };

        let message = build_message(alert, mailer.from.clone(), mailer.to.clone())?;

        debug!(to = %mailer.to, stage = %alert.stage, "sending alert via SMTP");
        let response = mailer
            .transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Send {
                to: mailer.to.to_string(),
                source: e,
            })?;

        info!(to = %mailer.to, code = %response.code(), "Email alert sent");
        Ok(())
    }
}

/// Compose the plain-text alert message.
pub fn build_message(
    alert: &AlertEvent,
    from: Mailbox,
    to: Mailbox,
) -> Result<Message, NotifyError> {
    Message::builder()
        .from(from)
        .to(to)
        .subject(alert.subject())
        .header(ContentType::TEXT_PLAIN)
        .body(alert.body())
        .map_err(|e| NotifyError::Message { source: e })
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, NotifyError> {
    value.parse().map_err(|e| NotifyError::Address {
        field,
        value: value.to_owned(),
        source: e,
    })
}
