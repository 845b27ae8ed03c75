//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Booking, BookingStatus, Event, Faq, GalleryAsset, Page, ServiceDetail, SiteSettings,
    Testimonial,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Raised (inside `anyhow::Error`) when a write lost a race against another
/// writer: a conditional update matched no row, or a unique key was taken
/// between check and insert. The service retries or re-reads on it.
#[derive(Debug, thiserror::Error)]
#[error("concurrent write detected on {resource}")]
pub struct WriteConflict {
    pub resource: &'static str,
}

impl WriteConflict {
    pub fn on(resource: &'static str) -> anyhow::Error {
        anyhow::Error::new(Self { resource })
    }
}

/// True when the error chain carries a [`WriteConflict`]
pub fn is_write_conflict(err: &anyhow::Error) -> bool {
    err.downcast_ref::<WriteConflict>().is_some()
}

/// Repository for booking requests
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking
    async fn create(&self, booking: &Booking) -> Result<Booking>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;

    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Booking>>;

    /// Newest first
    async fn list(
        &self,
        status: Option<BookingStatus>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Booking>>;

    /// Returns `None` when the booking does not exist
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Option<Booking>>;
}

/// Repository for public events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Ordered by date ascending
    async fn list(&self) -> Result<Vec<Event>>;

    async fn create(&self, event: &Event) -> Result<Event>;

    /// Replace an event, keeping its stored `created_at`.
    /// Returns `None` when the event does not exist
    async fn update(&self, event: &Event) -> Result<Option<Event>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Repository for gallery assets
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Ordered by position, then creation time
    async fn list(&self, category: Option<&str>) -> Result<Vec<GalleryAsset>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GalleryAsset>>;

    async fn create(&self, asset: &GalleryAsset) -> Result<GalleryAsset>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Apply `(id, position)` pairs; unknown ids are skipped
    async fn set_positions(&self, positions: &[(Uuid, i32)]) -> Result<()>;
}

/// Repository for slug-addressed page documents
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>>;

    /// Insert the first version; fails with [`WriteConflict`] if the slug exists
    async fn insert(&self, page: &Page) -> Result<Page>;

    /// Replace content only if the stored `updated_at` still equals
    /// `expected_updated_at`; fails with [`WriteConflict`] otherwise
    async fn update_if_unchanged(
        &self,
        page: &Page,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<Page>;
}

/// Repository for the site settings singleton
#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    async fn get(&self) -> Result<Option<SiteSettings>>;

    /// Create or replace the singleton
    async fn save(&self, settings: &SiteSettings) -> Result<SiteSettings>;
}

/// Repository for FAQ entries
#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// Ordered by position
    async fn list(&self) -> Result<Vec<Faq>>;

    async fn create(&self, faq: &Faq) -> Result<Faq>;

    /// Returns `None` when the entry does not exist
    async fn update(&self, faq: &Faq) -> Result<Option<Faq>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Repository for testimonials
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    /// Ordered by position
    async fn list(&self, published_only: bool) -> Result<Vec<Testimonial>>;

    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Repository for per-service detail pages
#[async_trait]
pub trait ServiceDetailRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<ServiceDetail>>;

    /// Ordered by name
    async fn list(&self) -> Result<Vec<ServiceDetail>>;

    /// Create or replace by name
    async fn upsert(&self, detail: &ServiceDetail) -> Result<ServiceDetail>;
}
