//! Module wiring and lifecycle
//!
//! Builds repositories, the object store, the mailer and the notifier from
//! configuration, and owns the background notification worker.

use crate::api::native::NativeClient;
use crate::api::rest::{build_router, AppState};
use crate::config::{Config, DatabaseConfig, NotificationMode};
use crate::contract::VenueApi;
use crate::domain::{
    BookingNotifier, InlineNotifier, PublicUrls, QueuedNotifier, Repositories, Service,
    ServiceOptions,
};
use crate::infra::media::LocalObjectStore;
use crate::infra::storage::repositories::{
    SeaOrmBookingRepository, SeaOrmEventRepository, SeaOrmFaqRepository,
    SeaOrmGalleryRepository, SeaOrmPageRepository, SeaOrmServiceDetailRepository,
    SeaOrmSiteSettingsRepository, SeaOrmTestimonialRepository,
};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long shutdown waits for queued notifications to drain
const STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Venue service module
pub struct VenueServiceModule {
    config: Config,
    service: Arc<Service>,
    object_store: Arc<LocalObjectStore>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl VenueServiceModule {
    /// Build the module on an already-migrated database
    pub async fn init(config: Config, db: DatabaseConnection) -> Result<Self> {
        let repos = repositories(Arc::new(db));

        let object_store = Arc::new(LocalObjectStore::new(&config.media.root_dir).await?);
        let mailer = crate::infra::mail::from_config(&config.mail)?;

        let cancel = CancellationToken::new();
        let (notifier, worker): (Arc<dyn BookingNotifier>, Option<JoinHandle<()>>) =
            match config.notifications.mode {
                NotificationMode::Queued => {
                    let (notifier, handle) = QueuedNotifier::spawn(
                        mailer,
                        config.notifications.queue_capacity,
                        cancel.clone(),
                    );
                    (Arc::new(notifier), Some(handle))
                }
                NotificationMode::Inline => (Arc::new(InlineNotifier::new(mailer)), None),
            };

        let service = Arc::new(Service::new(
            repos,
            object_store.clone(),
            notifier,
            service_options(&config),
        ));

        tracing::info!(
            notifications = ?config.notifications.mode,
            mail_provider = ?config.mail.provider,
            "Venue service initialized"
        );

        Ok(Self {
            config,
            service,
            object_store,
            cancel,
            worker,
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn VenueApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// HTTP router, serving stored media under `/media`
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(self.service.clone(), self.config.admin_token.as_deref());
        build_router(state, &self.config.server, Some(self.object_store.root()))
    }

    /// Stop the notification worker after it drains its queue
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            match tokio::time::timeout(STOP_TIMEOUT, worker).await {
                Ok(Ok(())) => tracing::info!("Notification worker drained"),
                Ok(Err(e)) => tracing::error!(error = %e, "Notification worker panicked"),
                Err(_) => tracing::warn!("Notification worker did not drain in time"),
            }
        }
    }
}

/// Open the database pool
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to database '{}'", redact(&cfg.url)))
}

/// Apply pending migrations
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    use crate::infra::storage::migrations::Migrator;
    use sea_orm_migration::MigratorTrait;

    Migrator::up(db, None).await?;
    tracing::info!("Venue service migrations completed");
    Ok(())
}

/// SeaORM-backed repositories sharing one connection
pub fn repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        bookings: Arc::new(SeaOrmBookingRepository::new(db.clone())),
        events: Arc::new(SeaOrmEventRepository::new(db.clone())),
        gallery: Arc::new(SeaOrmGalleryRepository::new(db.clone())),
        pages: Arc::new(SeaOrmPageRepository::new(db.clone())),
        settings: Arc::new(SeaOrmSiteSettingsRepository::new(db.clone())),
        faqs: Arc::new(SeaOrmFaqRepository::new(db.clone())),
        testimonials: Arc::new(SeaOrmTestimonialRepository::new(db.clone())),
        service_details: Arc::new(SeaOrmServiceDetailRepository::new(db)),
    }
}

pub fn service_options(config: &Config) -> ServiceOptions {
    ServiceOptions {
        operator_email: config.mail.operator_email.clone(),
        page_save_attempts: config.pages.save_attempts,
        page_save_backoff: Duration::from_millis(config.pages.save_backoff_ms),
        public_urls: PublicUrls::new(config.media.public_base_url.clone()),
        max_upload_bytes: config.media.max_upload_bytes,
        ..ServiceOptions::default()
    }
}

/// Database URL with any password masked
fn redact(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() && parsed.set_password(Some("***")).is_err() {
                return "<redacted>".to_string();
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
