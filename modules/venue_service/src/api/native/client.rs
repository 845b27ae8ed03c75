//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    BookingReceipt, BookingSubmission, Event, Faq, GalleryAsset, Page, ServiceDetail,
    SiteSettings, Testimonial, VenueApi, VenueError,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used for in-process communication without HTTP overhead, e.g. by a
/// renderer that builds the public pages.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl VenueApi for NativeClient {
    async fn submit_booking(
        &self,
        submission: BookingSubmission,
        idempotency_key: Option<String>,
    ) -> Result<BookingReceipt, VenueError> {
        self.service
            .submit_booking(&submission, idempotency_key.as_deref())
            .await
    }

    async fn home_page(&self) -> Result<Page, VenueError> {
        self.service.home_page().await
    }

    async fn site_settings(&self) -> Result<SiteSettings, VenueError> {
        self.service.site_settings().await
    }

    async fn list_events(&self) -> Result<Vec<Event>, VenueError> {
        self.service.list_events().await
    }

    async fn list_gallery(&self, category: Option<&str>) -> Result<Vec<GalleryAsset>, VenueError> {
        self.service.list_gallery(category).await
    }

    async fn list_faqs(&self) -> Result<Vec<Faq>, VenueError> {
        self.service.list_faqs().await
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, VenueError> {
        self.service.list_testimonials(false).await
    }

    async fn service_detail(&self, name: &str) -> Result<ServiceDetail, VenueError> {
        self.service.service_detail(name).await
    }
}
