//! Domain layer - business logic and services

pub mod media;
pub mod notify;
pub mod repository;
pub mod service;
pub mod validation;

pub use media::{ObjectStore, PublicUrls};
pub use notify::{BookingNotifier, Email, InlineNotifier, Mailer, NotificationError, QueuedNotifier};
pub use repository::{
    BookingRepository, EventRepository, FaqRepository, GalleryRepository, PageRepository,
    ServiceDetailRepository, SiteSettingsRepository, TestimonialRepository, WriteConflict,
};
pub use service::{Repositories, Service, ServiceOptions};
