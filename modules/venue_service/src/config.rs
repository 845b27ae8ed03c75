//! Configuration for the venue service module

use serde::Deserialize;
use std::path::PathBuf;

/// Venue service configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub pages: PagesConfig,

    /// Bearer token required on admin routes; admin routes are open when unset
    #[serde(default)]
    pub admin_token: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Maximum request body size in bytes (uploads included)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            body_limit_bytes: default_body_limit(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `postgres://...` or `sqlite://...`
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Directory the filesystem object store writes into
    #[serde(default = "default_media_root")]
    pub root_dir: PathBuf,

    /// Prefix of public object URLs
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_dir: default_media_root(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Which transactional e-mail backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log only
    #[default]
    Log,
    /// Brevo transactional e-mail API
    Brevo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    #[serde(default)]
    pub provider: MailProvider,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    #[serde(default)]
    pub sender_name: Option<String>,

    /// Booking alert recipient when site settings name none
    #[serde(default)]
    pub operator_email: Option<String>,

    #[serde(default = "default_mail_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            api_key: None,
            api_url: default_api_url(),
            sender_email: default_sender_email(),
            sender_name: None,
            operator_email: None,
            timeout_ms: default_mail_timeout_ms(),
        }
    }
}

/// How booking e-mails are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    /// Background worker fed by a bounded queue
    #[default]
    Queued,
    /// Sent inside the booking request
    Inline,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    #[serde(default)]
    pub mode: NotificationMode,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            mode: NotificationMode::default(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagesConfig {
    /// Attempts for a page save that keeps racing other writers
    #[serde(default = "default_save_attempts")]
    pub save_attempts: u32,

    #[serde(default = "default_save_backoff_ms")]
    pub save_backoff_ms: u64,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            save_attempts: default_save_attempts(),
            save_backoff_ms: default_save_backoff_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_body_limit() -> usize {
    12 * 1024 * 1024 // 12MB
}

fn default_database_url() -> String {
    "sqlite://venue.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./media")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_max_upload() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_sender_email() -> String {
    "no-reply@example.com".to_string()
}

fn default_mail_timeout_ms() -> u64 {
    10_000
}

fn default_queue_capacity() -> usize {
    256
}

fn default_save_attempts() -> u32 {
    3
}

fn default_save_backoff_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info,venue_service=debug".to_string()
}
