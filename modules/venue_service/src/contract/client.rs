//! Native client trait for inter-module communication
//!
//! Read-side and booking operations other modules (e.g. a page renderer)
//! call in-process. NO HTTP - direct function calls.

use super::{
    error::VenueError,
    model::{
        BookingReceipt, BookingSubmission, Event, Faq, GalleryAsset, Page, ServiceDetail,
        SiteSettings, Testimonial,
    },
};
use async_trait::async_trait;

/// Venue service API for inter-module communication
#[async_trait]
pub trait VenueApi: Send + Sync {
    /// Validate, persist and notify a booking request
    async fn submit_booking(
        &self,
        submission: BookingSubmission,
        idempotency_key: Option<String>,
    ) -> Result<BookingReceipt, VenueError>;

    /// Home page document, or the built-in defaults
    async fn home_page(&self) -> Result<Page, VenueError>;

    /// Site settings, or the built-in defaults
    async fn site_settings(&self) -> Result<SiteSettings, VenueError>;

    /// Events ordered by date
    async fn list_events(&self) -> Result<Vec<Event>, VenueError>;

    /// Gallery assets ordered by position
    async fn list_gallery(&self, category: Option<&str>) -> Result<Vec<GalleryAsset>, VenueError>;

    async fn list_faqs(&self) -> Result<Vec<Faq>, VenueError>;

    /// Published testimonials only
    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, VenueError>;

    async fn service_detail(&self, name: &str) -> Result<ServiceDetail, VenueError>;
}
