use std::time::Duration;

use imgslim_core::{AlertEvent, ImageRef, MailConfig, Stage};
use imgslim_notify::{EmailNotifier, EmailSettings, Notifier, NotifyError, build_message};
use secrecy::SecretString;

fn alert(image: &str, size_mb: f64, stage: Stage) -> AlertEvent {
    AlertEvent {
        image: ImageRef::new(image).unwrap(),
        size_mb,
        stage,
    }
}

fn password() -> SecretString {
    SecretString::from("secret".to_owned())
}

// ── Message composition ──

#[test]
fn message_carries_subject_and_plain_text_body() {
    let alert = alert("app:1.0", 668.91, Stage::Initial);
    let message = build_message(
        &alert,
        "ops@example.com".parse().unwrap(),
        "alerts@example.com".parse().unwrap(),
    )
    .unwrap();

    assert_eq!(
        message.headers().get_raw("Subject"),
        Some("Alert: Docker Image app:1.0 Size Initial")
    );

    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("Content-Type: text/plain"));
    assert!(formatted.contains("To: alerts@example.com"));
    assert!(formatted.contains("Warning: Docker image app:1.0 is 668.91MB."));
    assert!(!formatted.contains("was optimized"));
}

#[test]
fn optimized_message_includes_extra_sentence() {
    let alert = alert("app:1.0_optimized", 388.86, Stage::Optimized);
    let message = build_message(
        &alert,
        "ops@example.com".parse().unwrap(),
        "alerts@example.com".parse().unwrap(),
    )
    .unwrap();

    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("388.86MB"));
    assert!(formatted.contains("The image was optimized and the current size is below the limit."));
}

// ── Settings ──

#[test]
fn settings_require_sender_and_recipient() {
    let config = MailConfig::default();

    let result = EmailSettings::from_config(&config, password(), Duration::from_secs(30));

    assert!(matches!(
        result,
        Err(imgslim_core::Error::MissingMailField("from"))
    ));
}

#[test]
fn settings_take_host_and_port_from_config() {
    let config = MailConfig {
        smtp_host: "smtp.example.com".to_owned(),
        smtp_port: 2525,
        from: Some("ops@example.com".to_owned()),
        to: Some("alerts@example.com".to_owned()),
        ..Default::default()
    };

    let settings = EmailSettings::from_config(&config, password(), Duration::from_secs(5)).unwrap();

    assert_eq!(settings.smtp_host, "smtp.example.com");
    assert_eq!(settings.smtp_port, 2525);
    assert_eq!(settings.from, "ops@example.com");
    assert_eq!(settings.to, "alerts@example.com");
    assert_eq!(settings.timeout, Duration::from_secs(5));
}

// ── Delivery ──

#[tokio::test]
async fn dry_run_logs_instead_of_sending() {
    let notifier = EmailNotifier::dry_run();

    notifier
        .notify(&alert("app:1.0", 668.91, Stage::Initial))
        .await
        .unwrap();
}

#[tokio::test]
async fn unreachable_relay_reports_send_error() {
    let settings = EmailSettings {
        smtp_host: "localhost".to_owned(),
        smtp_port: 1,
        from: "ops@example.com".to_owned(),
        to: "alerts@example.com".to_owned(),
        password: password(),
        timeout: Duration::from_secs(2),
    };
    let notifier = EmailNotifier::new(settings).unwrap();

    let result = notifier
        .notify(&alert("app:1.0", 668.91, Stage::Initial))
        .await;

    assert!(matches!(result, Err(NotifyError::Send { .. })));
}

#[tokio::test]
async fn unavailable_notifier_fails_every_alert() {
    let notifier = EmailNotifier::unavailable("missing environment variable: IMGSLIM_SMTP_PASSWORD");

    for stage in [Stage::Initial, Stage::Optimized] {
        let result = notifier.notify(&alert("app:1.0", 668.91, stage)).await;

        assert!(matches!(
            result,
            Err(NotifyError::Unavailable { ref reason }) if reason.contains("IMGSLIM_SMTP_PASSWORD")
        ));
    }
}
