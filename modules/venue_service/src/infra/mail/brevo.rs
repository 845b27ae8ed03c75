//! Brevo transactional e-mail API

use crate::config::MailConfig;
use crate::domain::{Email, Mailer, NotificationError};
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<BrevoEmailAddress>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    text_content: String,
}

pub struct BrevoMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender: (String, Option<String>),
}

impl BrevoMailer {
    pub fn from_config(cfg: &MailConfig) -> anyhow::Result<Self> {
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .context("mail.api_key is required for the brevo provider")?
            .to_string();
        if cfg.sender_email.trim().is_empty() {
            bail!("mail.sender_email is required for the brevo provider");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(concat!("venue-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: cfg.api_url.clone(),
            api_key,
            sender: (cfg.sender_email.trim().to_string(), cfg.sender_name.clone()),
        })
    }

    fn body(&self, email: &Email) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.sender.0.clone(),
                name: self.sender.1.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: email.to.clone(),
                name: email.to_name.clone(),
            }],
            reply_to: email.reply_to.clone().map(|email| BrevoEmailAddress { email, name: None }),
            subject: email.subject.clone(),
            html_content: email.html.clone(),
            text_content: email.text.clone(),
        }
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        let resp = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&self.body(email))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            debug!(to = %email.to, "Brevo accepted message");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
