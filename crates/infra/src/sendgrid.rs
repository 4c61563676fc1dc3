//! SendGrid v3 `mail/send` adapter.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use stocksync_report::{Email, NotificationSink, NotifyError};

use crate::config::{ApiKey, SendGridConfig};

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime_type: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct AttachmentPayload<'a> {
    content: String,
    filename: &'a str,
    #[serde(rename = "type")]
    mime_type: &'a str,
    disposition: &'static str,
}

impl<'a> MailSendRequest<'a> {
    fn from_email(email: &'a Email) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            content: vec![Content {
                mime_type: "text/html",
                value: &email.html_body,
            }],
            attachments: email
                .attachment
                .iter()
                .map(|a| AttachmentPayload {
                    content: STANDARD.encode(&a.content),
                    filename: &a.filename,
                    mime_type: &a.mime_type,
                    disposition: "attachment",
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendGridNotifier {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl SendGridNotifier {
    pub fn new(config: &SendGridConfig, timeout: Duration) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}v3/mail/send", config.base_url),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl NotificationSink for SendGridNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&MailSendRequest::from_email(email))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NotifyError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}
