//! Contract models for the venue service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ===== Bookings =====

/// A customer's event-reservation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Requested event day
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub guest_count: Option<u32>,
    pub message: Option<String>,
    /// Starts at `New`; only changed through the admin status operation
    pub status: BookingStatus,
    /// Client-supplied key used to collapse resubmissions
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw booking form as submitted by the public site.
///
/// Every field is optional here; `domain::validation::validate_booking`
/// decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_date: Option<String>,
    pub event_type: Option<String>,
    /// Number or numeric string; coerced leniently
    pub guest_count: Option<serde_json::Value>,
    pub message: Option<String>,
}

/// Kind of event a booking is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Corporate,
    Party,
    Wedding,
    Birthday,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Corporate,
        EventType::Party,
        EventType::Wedding,
        EventType::Birthday,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Corporate => "corporate",
            EventType::Party => "party",
            EventType::Wedding => "wedding",
            EventType::Birthday => "birthday",
            EventType::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown event type '{}'", s))
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    New,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::New => "new",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(BookingStatus::New),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// Result of a booking submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking: Booking,
    /// False when an earlier booking with the same idempotency key was returned
    pub created: bool,
}

// ===== Events =====

/// A public event shown on the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Free-form time label, e.g. "20:00"
    pub time: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable event fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
}

// ===== Gallery =====

/// An image in the gallery carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryAsset {
    pub id: Uuid,
    pub title: String,
    pub alt: Option<String>,
    /// Public URL
    pub url: String,
    /// Object store key, when the asset lives in our bucket
    pub key: Option<String>,
    pub category: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Gallery asset to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGalleryAsset {
    pub title: String,
    pub alt: Option<String>,
    pub url: String,
    pub category: String,
}

/// Binary upload headed for the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub category: String,
    /// Overrides the `gallery/<category>` prefix
    pub folder: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
}

// ===== Singleton documents =====

/// The home page document
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    /// Section content (hero, about, services, contact)
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page write carrying the client's view of the document
#[derive(Debug, Clone, PartialEq)]
pub struct PageWrite {
    pub content: serde_json::Value,
    /// `updatedAt` the client last saw; `None` disables the stale check
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// Site-wide settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub business_hours: Option<String>,
    /// Operator address for booking alerts; falls back to mail config
    pub booking_notification_email: Option<String>,
    /// `None` while the built-in defaults are being served
    pub updated_at: Option<DateTime<Utc>>,
}

// ===== FAQ, testimonials, service details =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    /// Appended at the end when absent
    pub position: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub id: Uuid,
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
    /// 1..=5
    pub rating: u8,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialDraft {
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
    pub rating: u8,
    pub published: bool,
}

/// Description and image gallery of one offered service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetail {
    pub id: Uuid,
    /// Unique service name used for lookups
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetailDraft {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
}
