//! Domain service - business logic orchestration
//!
//! One `Service` owns every repository plus the object store and the
//! booking notifier. Operations are grouped by concern in the submodules.

mod booking;
mod catalog;
mod content;
mod gallery;

use super::media::{ObjectStore, PublicUrls};
use super::notify::BookingNotifier;
use super::repository::{
    BookingRepository, EventRepository, FaqRepository, GalleryRepository, PageRepository,
    ServiceDetailRepository, SiteSettingsRepository, TestimonialRepository,
};
use crate::contract::VenueError;
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Every collection the service persists to
#[derive(Clone)]
pub struct Repositories {
    pub bookings: Arc<dyn BookingRepository>,
    pub events: Arc<dyn EventRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub settings: Arc<dyn SiteSettingsRepository>,
    pub faqs: Arc<dyn FaqRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub service_details: Arc<dyn ServiceDetailRepository>,
}

/// Tunables taken from module configuration
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Used in e-mails until site settings are saved
    pub site_name: String,
    /// Booking alert recipient when site settings name none
    pub operator_email: Option<String>,
    /// Attempts for a page save that keeps hitting write conflicts
    pub page_save_attempts: u32,
    /// Base delay between page save attempts; jitter is added on top
    pub page_save_backoff: Duration,
    pub public_urls: PublicUrls,
    pub max_upload_bytes: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            site_name: "Event Venue".to_string(),
            operator_email: None,
            page_save_attempts: 3,
            page_save_backoff: Duration::from_millis(50),
            public_urls: PublicUrls::new("http://localhost:8080/media"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Domain service for the venue site
pub struct Service {
    repos: Repositories,
    object_store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn BookingNotifier>,
    options: ServiceOptions,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        object_store: Arc<dyn ObjectStore>,
        notifier: Arc<dyn BookingNotifier>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            repos,
            object_store,
            notifier,
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }
}

/// Log a repository failure and collapse it into the opaque storage error
fn storage(err: anyhow::Error) -> VenueError {
    tracing::error!(error = ?err, "Storage operation failed");
    VenueError::Storage
}

/// Current time at millisecond precision, so browser clients can echo
/// timestamps back without losing precision
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Next position after the largest one in use
fn next_position(positions: impl Iterator<Item = i32>) -> i32 {
    positions.max().map_or(0, |p| p.saturating_add(1))
}
