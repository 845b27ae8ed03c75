//! Transactional e-mail backends

pub mod brevo;
pub mod log;

pub use brevo::BrevoMailer;
pub use log::LogMailer;

use crate::config::{MailConfig, MailProvider};
use crate::domain::Mailer;
use std::sync::Arc;

/// Build the mailer selected in configuration
pub fn from_config(cfg: &MailConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match cfg.provider {
        MailProvider::Log => Arc::new(LogMailer),
        MailProvider::Brevo => Arc::new(BrevoMailer::from_config(cfg)?),
    };
    Ok(mailer)
}
