use std::path::PathBuf;
use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info};

use sereno_core::models::BookingDetail;

use crate::template;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("smtp error: {0}")]
    Smtp(String),
    #[error("outbox write failed: {0}")]
    Outbox(#[from] std::io::Error),
    #[error("send task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Confirmation sender. `smtp` delivers over a relay; `log_only` prints the
/// rendered email and drops a copy in the outbox directory, which is the mode
/// development environments run in.
pub enum Notifier {
    Smtp {
        host: String,
        port: u16,
        credentials: Credentials,
        from: String,
    },
    Log {
        outbox: Option<PathBuf>,
    },
}

impl Notifier {
    pub fn smtp(
        host: String,
        port: u16,
        username: String,
        password: String,
        from_email: &str,
        from_name: &str,
    ) -> Self {
        Self::Smtp {
            host,
            port,
            credentials: Credentials::new(username, password),
            from: format!("{from_name} <{from_email}>"),
        }
    }

    pub fn log_only(outbox: Option<PathBuf>) -> Self {
        Self::Log { outbox }
    }

    pub async fn send_confirmation(&self, detail: &BookingDetail) -> Result<(), NotifyError> {
        let subject = template::subject(detail);
        let body = template::render(detail);

        match self {
            Self::Smtp {
                host,
                port,
                credentials,
                from,
            } => {
                let message = Message::builder()
                    .from(
                        from.parse()
                            .map_err(|e| NotifyError::Address(format!("from: {e}")))?,
                    )
                    .to(detail
                        .email
                        .parse()
                        .map_err(|e| NotifyError::Address(format!("to: {e}")))?)
                    .subject(subject)
                    .header(ContentType::TEXT_HTML)
                    .body(body)
                    .map_err(|e| NotifyError::Message(e.to_string()))?;

                let mailer = SmtpTransport::relay(host)
                    .map_err(|e| NotifyError::Smtp(e.to_string()))?
                    .port(*port)
                    .credentials(credentials.clone())
                    .build();

                // lettre's sync transport blocks on the socket.
                tokio::task::spawn_blocking(move || {
                    mailer.send(&message).map_err(|e| NotifyError::Smtp(e.to_string()))
                })
                .await??;

                info!(to = %detail.email, reference = %detail.reference, "confirmation email sent");
                Ok(())
            }
            Self::Log { outbox } => {
                info!("=== EMAIL NOTIFICATION ===");
                info!("To: {}", detail.email);
                info!("Subject: {}", subject);
                info!("Body (HTML):\n{}", body);
                info!("=== END EMAIL ===");

                let dir = outbox.clone().unwrap_or_else(|| PathBuf::from("."));
                let path = dir.join(format!("email_{}.html", detail.reference));
                tokio::fs::write(&path, body).await?;
                info!("Email content saved to {}", path.display());
                Ok(())
            }
        }
    }
}

/// Fire-and-forget delivery. The booking is already committed when this runs,
/// so a failed send only gets logged; it never fails the request.
pub fn dispatch(notifier: Arc<Notifier>, detail: BookingDetail) {
    tokio::spawn(async move {
        if let Err(err) = notifier.send_confirmation(&detail).await {
            error!(reference = %detail.reference, "Error sending confirmation email: {}", err);
        }
    });
}
