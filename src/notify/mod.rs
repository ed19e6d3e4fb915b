//! Email notifications for new applications.
//!
//! Dispatch is best-effort: each message is attempted at most once, failures
//! are reported in a [`DispatchReport`] for logging and never reach the
//! HTTP caller.

mod smtp;
mod templates;

pub use smtp::SmtpMailTransport;
pub use templates::MailTemplates;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::models::NewApplication;

/// A plain-text email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Errors raised while building or sending a message.
#[derive(Debug)]
pub enum MailError {
    /// A sender or recipient address could not be parsed
    Address(String),
    /// The message could not be assembled
    Message(String),
    /// The relay rejected the message or could not be reached
    Transport(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::Address(msg) => write!(f, "invalid address: {}", msg),
            MailError::Message(msg) => write!(f, "invalid message: {}", msg),
            MailError::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for MailError {}

/// Outbound mail transport.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Skipped(&'static str),
    Failed(String),
}

/// Outcome of both notifications for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub applicant: DispatchOutcome,
    pub admin: DispatchOutcome,
}

impl DispatchReport {
    fn skipped(reason: &'static str) -> Self {
        Self {
            applicant: DispatchOutcome::Skipped(reason),
            admin: DispatchOutcome::Skipped(reason),
        }
    }

    /// Write the report to the log. This is the only place it goes.
    pub fn log(&self, application_id: i64) {
        for (kind, outcome) in [("applicant", &self.applicant), ("admin", &self.admin)] {
            match outcome {
                DispatchOutcome::Sent => {
                    tracing::info!(application_id, kind, "Notification email sent")
                }
                DispatchOutcome::Skipped(reason) => {
                    tracing::debug!(application_id, kind, reason, "Notification email skipped")
                }
                DispatchOutcome::Failed(error) => {
                    tracing::error!(application_id, kind, %error, "Failed to send notification email")
                }
            }
        }
    }
}

/// Composes and sends the applicant confirmation and admin alert.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Option<Arc<dyn MailTransport>>,
    from_email: String,
    admin_email: Option<String>,
    templates: MailTemplates,
}

impl Dispatcher {
    pub fn new(
        transport: Option<Arc<dyn MailTransport>>,
        from_email: impl Into<String>,
        admin_email: Option<String>,
        templates: MailTemplates,
    ) -> Self {
        Self {
            transport,
            from_email: from_email.into(),
            admin_email,
            templates,
        }
    }

    /// Build a dispatcher from configuration.
    ///
    /// Without an SMTP host, or with SMTP settings the client rejects, the
    /// dispatcher is created with no transport and every dispatch is skipped.
    pub fn from_config(config: &Config) -> Self {
        let transport: Option<Arc<dyn MailTransport>> = match &config.smtp {
            Some(smtp) => match SmtpMailTransport::new(smtp) {
                Ok(transport) => Some(Arc::new(transport)),
                Err(e) => {
                    tracing::error!("Invalid SMTP configuration, emails disabled: {}", e);
                    None
                }
            },
            None => None,
        };

        Self::new(
            transport,
            config.from_email.clone(),
            config.admin_email.clone(),
            MailTemplates::new(config.course_title.clone(), config.mail_signature.clone()),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Attempt both notifications for a stored submission.
    ///
    /// The two sends are independent; a failed applicant confirmation does
    /// not stop the admin alert.
    pub async fn dispatch(&self, application: &NewApplication) -> DispatchReport {
        let Some(transport) = &self.transport else {
            tracing::warn!("SMTP not configured; skipping sending emails.");
            return DispatchReport::skipped("smtp not configured");
        };

        let confirmation = self
            .templates
            .applicant_confirmation(&self.from_email, application);
        let applicant = attempt(transport.as_ref(), &confirmation).await;

        let admin = match &self.admin_email {
            Some(admin_email) => {
                let alert = self
                    .templates
                    .admin_alert(&self.from_email, admin_email, application);
                attempt(transport.as_ref(), &alert).await
            }
            None => DispatchOutcome::Skipped("admin email not configured"),
        };

        DispatchReport { applicant, admin }
    }
}

async fn attempt(transport: &dyn MailTransport, message: &MailMessage) -> DispatchOutcome {
    match transport.send(message).await {
        Ok(()) => DispatchOutcome::Sent,
        Err(e) => DispatchOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every message and fails sends addressed to `fail_to`.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<MailMessage>>,
        fail_to: Option<String>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
            if self.fail_to.as_deref() == Some(message.to.as_str()) {
                return Err(MailError::Transport("connection refused".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn application() -> NewApplication {
        NewApplication {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            experience: String::new(),
            goals: String::new(),
            platforms: vec!["Meta".to_string(), "Google".to_string()],
            timezone: String::new(),
            preferred_times: Vec::new(),
        }
    }

    fn dispatcher(transport: Arc<RecordingTransport>, admin: Option<&str>) -> Dispatcher {
        Dispatcher::new(
            Some(transport as Arc<dyn MailTransport>),
            "no-reply@example.com",
            admin.map(str::to_string),
            MailTemplates::new("Media Buying Course", "The Course Team"),
        )
    }

    #[tokio::test]
    async fn test_sends_both_messages() {
        let transport = Arc::new(RecordingTransport::default());
        let report = dispatcher(transport.clone(), Some("admin@example.com"))
            .dispatch(&application())
            .await;

        assert_eq!(report.applicant, DispatchOutcome::Sent);
        assert_eq!(report.admin, DispatchOutcome::Sent);

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "ada@example.com");
        assert_eq!(sent[1].to, "admin@example.com");
        assert!(sent.iter().all(|m| m.from == "no-reply@example.com"));
    }

    #[tokio::test]
    async fn test_applicant_failure_does_not_block_admin() {
        let transport = Arc::new(RecordingTransport {
            fail_to: Some("ada@example.com".to_string()),
            ..Default::default()
        });
        let report = dispatcher(transport.clone(), Some("admin@example.com"))
            .dispatch(&application())
            .await;

        assert!(matches!(report.applicant, DispatchOutcome::Failed(_)));
        assert_eq!(report.admin, DispatchOutcome::Sent);
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_alert_skipped_without_address() {
        let transport = Arc::new(RecordingTransport::default());
        let report = dispatcher(transport.clone(), None)
            .dispatch(&application())
            .await;

        assert_eq!(report.applicant, DispatchOutcome::Sent);
        assert!(matches!(report.admin, DispatchOutcome::Skipped(_)));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_transport_skips_everything() {
        let dispatcher = Dispatcher::new(
            None,
            "no-reply@example.com",
            Some("admin@example.com".to_string()),
            MailTemplates::new("Media Buying Course", "The Course Team"),
        );
        assert!(!dispatcher.is_enabled());

        let report = dispatcher.dispatch(&application()).await;

        assert!(matches!(report.applicant, DispatchOutcome::Skipped(_)));
        assert!(matches!(report.admin, DispatchOutcome::Skipped(_)));
    }
}
