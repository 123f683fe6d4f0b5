#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid {field} address {value:?}")]
    Address {
        field: &'static str,
        value: String,
        source: lettre::address::AddressError,
    },

    #[error("failed to build email message")]
    Message { source: lettre::error::Error },

    #[error("failed to configure SMTP transport for {host}")]
    Transport {
        host: String,
        source: lettre::transport::smtp::Error,
    },

    #[error("email alerts unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("failed to send email to {to}")]
    Send {
        to: String,
        source: lettre::transport::smtp::Error,
    },
}
