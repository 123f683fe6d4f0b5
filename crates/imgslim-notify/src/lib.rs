//! Alert delivery for imgslim.
//!
//! [`Notifier`] is the seam the workflow depends on. [`EmailNotifier`]
//! sends one plain-text message per alert over STARTTLS, or only logs it
//! when built with [`EmailNotifier::dry_run`].

pub mod email;
pub mod error;

pub use email::{EmailNotifier, EmailSettings, Notifier, build_message};
pub use error::NotifyError;
