//! REST DTOs with serde derives for HTTP API
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Booking DTOs =====

/// Public booking form. Every field is optional at the wire level so that
/// missing fields produce a validation message instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[schema(example = "Ion Popescu")]
    pub name: Option<String>,
    #[schema(example = "ion@test.ro")]
    pub email: Option<String>,
    #[schema(example = "0712345678")]
    pub phone: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    #[schema(example = "2025-12-20")]
    pub event_date: Option<String>,
    /// corporate | party | wedding | birthday | other
    #[schema(example = "party")]
    pub event_type: Option<String>,
    /// Number or numeric string
    #[schema(value_type = Option<Object>, example = 50)]
    pub guest_count: Option<serde_json::Value>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// new | confirmed | cancelled
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: BookingDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingListResponse {
    pub items: Vec<BookingDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookingStatusRequest {
    /// new | confirmed | cancelled
    pub status: String,
}

/// `booking` is null when the id is unknown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingStatusResponse {
    pub success: bool,
    pub booking: Option<BookingDto>,
}

// ===== Event DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event create/update body; `id` is required for updates
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub items: Vec<EventDto>,
    pub total: usize,
}

/// `event` is null when an update targeted an unknown id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub success: bool,
    pub event: Option<EventDto>,
}

// ===== Gallery DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryAssetDto {
    pub id: Uuid,
    pub title: String,
    pub alt: Option<String>,
    pub url: String,
    /// Object store key for uploaded assets
    pub key: Option<String>,
    pub category: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Register an already-hosted image
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryAssetRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alt: Option<String>,
    pub url: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// Asset ids in display order
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryListResponse {
    pub items: Vec<GalleryAssetDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryAssetResponse {
    pub success: bool,
    pub asset: GalleryAssetDto,
}

// ===== Page DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    /// Absent while the built-in default is served
    pub id: Option<Uuid>,
    pub slug: String,
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
    /// Echo back as `lastUpdatedAt` when saving
    pub updated_at: DateTime<Utc>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePageRequest {
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    /// `updatedAt` of the version being edited; omit for last-writer-wins
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageResponse {
    pub success: bool,
    pub page: PageDto,
}

// ===== Site Settings DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsDto {
    pub site_name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub booking_notification_email: Option<String>,
    /// Null while the built-in defaults are served; ignored on input
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteSettingsResponse {
    pub success: bool,
    pub settings: SiteSettingsDto,
}

// ===== FAQ DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqDto {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// FAQ create/update body; `id` is required for updates
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FaqRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqListResponse {
    pub items: Vec<FaqDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqResponse {
    pub success: bool,
    pub faq: Option<FaqDto>,
}

// ===== Testimonial DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDto {
    pub id: Uuid,
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
    pub rating: u8,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestimonialRequest {
    pub author: String,
    #[serde(default)]
    pub role: Option<String>,
    pub quote: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default = "default_true")]
    pub published: bool,
}

fn default_rating() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestimonialListResponse {
    pub items: Vec<TestimonialDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestimonialResponse {
    pub success: bool,
    pub testimonial: TestimonialDto,
}

// ===== Service Detail DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ServiceDetailRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceDetailListResponse {
    pub items: Vec<ServiceDetailDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceDetailResponse {
    pub success: bool,
    pub detail: ServiceDetailDto,
}

// ===== Shared =====

/// Result of a delete; deleting an unknown id still succeeds
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    /// Whether a record was actually removed
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
