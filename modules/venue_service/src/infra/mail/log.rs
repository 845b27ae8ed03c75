//! Mailer that only logs; the default until a provider is configured

use crate::domain::{Email, Mailer, NotificationError};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            reply_to = ?email.reply_to,
            "E-mail not sent (log provider)"
        );
        Ok(())
    }
}
