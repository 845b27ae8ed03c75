//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod defaults;
pub mod error;
pub mod model;

pub use client::VenueApi;
pub use error::VenueError;
pub use model::{
    Booking, BookingReceipt, BookingStatus, BookingSubmission, Event, EventDraft, EventType,
    Faq, FaqDraft, GalleryAsset, MediaUpload, NewGalleryAsset, Page, PageWrite, ServiceDetail,
    ServiceDetailDraft, SiteSettings, Testimonial, TestimonialDraft,
};
