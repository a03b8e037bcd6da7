//! Booking confirmation delivery.
//!
//! Confirmations are rendered to HTML and either sent over SMTP or, when no
//! credentials are configured, logged and written to an outbox directory so
//! development setups still produce an inspectable artifact.

pub mod dispatcher;
pub mod template;

pub use dispatcher::{dispatch, Notifier, NotifyError};
