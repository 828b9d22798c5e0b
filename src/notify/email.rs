use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Notifier, NotifyError};
use crate::config::SmtpConfig;
use crate::models::SecurityAlert;

pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl EmailNotifier {
    pub fn new(config: &SmtpConfig, to: &str) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(EmailNotifier {
            transport,
            from: config.from.clone(),
            to: to.to_string(),
        })
    }

    fn render(alert: &SecurityAlert) -> String {
        format!(
            "<h2>Security Alert</h2>\
             <p>{}</p>\
             <ul>\
             <li>Severity: {}</li>\
             <li>Event type: {}</li>\
             <li>Affected user: {}</li>\
             <li>Events in window: {} within {} minutes</li>\
             <li>Triggered at: {}</li>\
             </ul>",
            alert.description,
            alert.severity.as_str(),
            alert.threshold.event_type.as_str(),
            alert.affected_user.as_deref().unwrap_or("unknown"),
            alert.event_count,
            alert.time_window_minutes,
            alert.triggered_at.to_rfc3339(),
        )
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn id(&self) -> &str {
        "email"
    }

    async fn notify(&self, alert: &SecurityAlert) -> Result<(), NotifyError> {
        let subject = format!(
            "[{}] Security alert: {}",
            alert.severity.as_str().to_uppercase(),
            alert.threshold.event_type.as_str()
        );

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| NotifyError::from(format!("Invalid from address: {e}")))?,
            )
            .to(self
                .to
                .parse()
                .map_err(|e| NotifyError::from(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(Self::render(alert))
            .map_err(|e| NotifyError::from(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::from(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}
