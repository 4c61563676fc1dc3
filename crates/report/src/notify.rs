//! Outgoing email contract.
//!
//! Delivery is fire-and-forget from the caller's point of view: a failed send
//! is logged and never changes the outcome of the run that produced the email.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn csv(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: "text/csv".to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<Attachment>,
}

impl Email {
    pub fn html(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("mail service rejected the message with status {status}")]
    Rejected { status: u16 },

    #[error("mail transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// Send `email`, logging the outcome. Returns whether the sink accepted it.
pub async fn deliver<N>(sink: &N, email: &Email) -> bool
where
    N: NotificationSink + ?Sized,
{
    match sink.send(email).await {
        Ok(()) => {
            info!(to = %email.to, subject = %email.subject, "email sent");
            true
        }
        Err(e) => {
            error!(to = %email.to, subject = %email.subject, error = %e, "failed to send email");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl NotificationSink for Failing {
        async fn send(&self, _email: &Email) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected { status: 401 })
        }
    }

    struct Accepting;

    #[async_trait]
    impl NotificationSink for Accepting {
        async fn send(&self, _email: &Email) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn email() -> Email {
        Email::html("bot@example.com", "ops@example.com", "Stock Report", "<p>hi</p>")
    }

    #[tokio::test]
    async fn delivery_failure_is_reported_not_raised() {
        assert!(!deliver(&Failing, &email()).await);
        assert!(deliver(&Accepting, &email()).await);
    }

    #[test]
    fn attachment_builder_sets_csv_mime_type() {
        let email = email().with_attachment(Attachment::csv("stock.csv", b"a,b\n".to_vec()));

        let attachment = email.attachment.unwrap();
        assert_eq!(attachment.mime_type, "text/csv");
        assert_eq!(attachment.filename, "stock.csv");
    }
}
