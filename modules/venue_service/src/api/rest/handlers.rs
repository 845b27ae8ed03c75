//! HTTP request handlers - thin layer that delegates to domain service

use super::auth::{verify_admin_token, AdminGuard};
use super::routes::AppState;
use super::{dto::*, error::ApiError, etag::versioned_json};
use crate::contract::{BookingStatus, BookingSubmission, MediaUpload};
use crate::domain::media::DEFAULT_CATEGORY;
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

/// Header carrying the client's booking idempotency key
pub const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// `?id=` on delete routes. Kept as a string so a bad value is reported as
/// a validation error.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

fn parse_id(raw: Option<&str>) -> Result<Uuid, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("required field missing: id"))?;
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("'{}' is not a valid id", raw)))
}

fn require_id(id: Option<Uuid>) -> Result<Uuid, ApiError> {
    id.ok_or_else(|| ApiError::bad_request("required field missing: id"))
}

// ===== Health =====

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ===== Bookings =====

/// Public booking intake
pub async fn submit_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Json(req) = payload?;
    let idempotency_key = headers
        .get(IDEMPOTENCY_KEY)
        .and_then(|v| v.to_str().ok());

    let submission: BookingSubmission = req.into();
    let receipt = state
        .service
        .submit_booking(&submission, idempotency_key)
        .await?;

    let message = if receipt.created {
        "Booking request received. We will contact you shortly."
    } else {
        "Booking request already received."
    };

    Ok(Json(BookingResponse {
        success: true,
        message: message.to_string(),
        booking: receipt.booking.into(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Operator listing, newest first
pub async fn list_bookings(
    _admin: AdminGuard,
    State(state): State<AppState>,
    query: Result<Query<BookingListQuery>, QueryRejection>,
) -> Result<Json<BookingListResponse>, ApiError> {
    let Query(query) = query?;
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<BookingStatus>().map_err(ApiError::bad_request))
        .transpose()?;

    let bookings = state
        .service
        .list_bookings(status, query.limit, query.offset)
        .await?;

    let items: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(BookingListResponse { items, total }))
}

pub async fn update_booking_status(
    _admin: AdminGuard,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BookingStatusRequest>, JsonRejection>,
) -> Result<Json<BookingStatusResponse>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let status = req
        .status
        .trim()
        .parse::<BookingStatus>()
        .map_err(ApiError::bad_request)?;

    let booking = state.service.update_booking_status(id, status).await?;
    Ok(Json(BookingStatusResponse {
        success: true,
        booking: booking.map(Into::into),
    }))
}

// ===== Events =====

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let items: Vec<EventDto> = state
        .service
        .list_events()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    versioned_json(&headers, &EventListResponse { items, total })
}

pub async fn create_event(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let Json(req) = payload?;
    let event = state.service.create_event(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            success: true,
            event: Some(event.into()),
        }),
    ))
}

pub async fn update_event(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<EventResponse>, ApiError> {
    let Json(req) = payload?;
    let id = require_id(req.id)?;
    let event = state.service.update_event(id, req.into()).await?;
    Ok(Json(EventResponse {
        success: true,
        event: event.map(Into::into),
    }))
}

pub async fn delete_event(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    let deleted = state.service.delete_event(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

// ===== Gallery =====

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

pub async fn list_gallery(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GalleryQuery>,
) -> Result<Response, ApiError> {
    let items: Vec<GalleryAssetDto> = state
        .service
        .list_gallery(query.category.as_deref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    versioned_json(&headers, &GalleryListResponse { items, total })
}

pub async fn create_gallery_asset(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<CreateGalleryAssetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryAssetResponse>), ApiError> {
    let Json(req) = payload?;
    let asset = state.service.add_gallery_asset(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(GalleryAssetResponse {
            success: true,
            asset: asset.into(),
        }),
    ))
}

/// Delete by id; unknown ids succeed
pub async fn delete_gallery_asset(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    let deleted = state.service.delete_gallery_asset(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

/// Multipart upload: `file` plus optional `category`, `title`, `alt`, `folder`
pub async fn upload_media(
    _admin: AdminGuard,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<GalleryAssetResponse>), ApiError> {
    let mut multipart = multipart?;
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut category = None;
    let mut title = None;
    let mut alt = None;
    let mut folder = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            "category" => category = Some(field.text().await?),
            "title" => title = Some(field.text().await?),
            "alt" => alt = Some(field.text().await?),
            "folder" => folder = Some(field.text().await?),
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| ApiError::bad_request("required field missing: file"))?;

    let upload = MediaUpload {
        file_name,
        content_type,
        data,
        category: category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        folder: folder.filter(|f| !f.trim().is_empty()),
        title,
        alt,
    };

    let asset = state.service.upload_media(upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(GalleryAssetResponse {
            success: true,
            asset: asset.into(),
        }),
    ))
}

pub async fn reorder_gallery(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(req) = payload?;
    state.service.reorder_gallery(&req.ids).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ===== Pages =====

pub async fn get_page(State(state): State<AppState>) -> Result<Json<PageDto>, ApiError> {
    let page = state.service.home_page().await?;
    Ok(Json(page.into()))
}

/// Save with optimistic concurrency; stale `lastUpdatedAt` yields 409
pub async fn save_page(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<SavePageRequest>, JsonRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    let Json(req) = payload?;
    let page = state.service.save_home_page(req.into()).await?;
    Ok(Json(PageResponse {
        success: true,
        page: page.into(),
    }))
}

// ===== Site settings =====

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SiteSettingsDto>, ApiError> {
    let settings = state.service.site_settings().await?;
    Ok(Json(settings.into()))
}

pub async fn save_settings(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<SiteSettingsDto>, JsonRejection>,
) -> Result<Json<SiteSettingsResponse>, ApiError> {
    let Json(req) = payload?;
    let settings = state.service.save_site_settings(req.into()).await?;
    Ok(Json(SiteSettingsResponse {
        success: true,
        settings: settings.into(),
    }))
}

// ===== Service details =====

#[derive(Debug, Deserialize)]
pub struct ServiceDetailQuery {
    pub name: Option<String>,
}

/// One detail by `?name=` (404 when unknown), or all of them
pub async fn get_service_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ServiceDetailQuery>,
) -> Result<Response, ApiError> {
    match query.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let detail: ServiceDetailDto = state.service.service_detail(name).await?.into();
            Ok(Json(detail).into_response())
        }
        None => {
            let items: Vec<ServiceDetailDto> = state
                .service
                .list_service_details()
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            let total = items.len();
            versioned_json(&headers, &ServiceDetailListResponse { items, total })
        }
    }
}

pub async fn upsert_service_detail(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<ServiceDetailRequest>, JsonRejection>,
) -> Result<Json<ServiceDetailResponse>, ApiError> {
    let Json(req) = payload?;
    let detail = state.service.upsert_service_detail(req.into()).await?;
    Ok(Json(ServiceDetailResponse {
        success: true,
        detail: detail.into(),
    }))
}

// ===== FAQ =====

pub async fn list_faqs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let items: Vec<FaqDto> = state
        .service
        .list_faqs()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    versioned_json(&headers, &FaqListResponse { items, total })
}

pub async fn create_faq(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<FaqRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FaqResponse>), ApiError> {
    let Json(req) = payload?;
    let faq = state.service.create_faq(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(FaqResponse {
            success: true,
            faq: Some(faq.into()),
        }),
    ))
}

pub async fn update_faq(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<FaqRequest>, JsonRejection>,
) -> Result<Json<FaqResponse>, ApiError> {
    let Json(req) = payload?;
    let id = require_id(req.id)?;
    let faq = state.service.update_faq(id, req.into()).await?;
    Ok(Json(FaqResponse {
        success: true,
        faq: faq.map(Into::into),
    }))
}

pub async fn delete_faq(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    let deleted = state.service.delete_faq(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

// ===== Testimonials =====

#[derive(Debug, Deserialize)]
pub struct TestimonialQuery {
    /// Include unpublished entries; admin only
    #[serde(default)]
    pub all: bool,
}

pub async fn list_testimonials(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<TestimonialQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    if query.all {
        verify_admin_token(&headers, state.admin_token.as_deref())?;
    }
    let items: Vec<TestimonialDto> = state
        .service
        .list_testimonials(query.all)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    versioned_json(&headers, &TestimonialListResponse { items, total })
}

pub async fn create_testimonial(
    _admin: AdminGuard,
    State(state): State<AppState>,
    payload: Result<Json<TestimonialRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TestimonialResponse>), ApiError> {
    let Json(req) = payload?;
    let testimonial = state.service.create_testimonial(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(TestimonialResponse {
            success: true,
            testimonial: testimonial.into(),
        }),
    ))
}

pub async fn delete_testimonial(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    let deleted = state.service.delete_testimonial(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}
