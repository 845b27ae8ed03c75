//! Route registration and the HTTP middleware stack

use super::{dto::*, error::ErrorBody, handlers};
use crate::config::ServerConfig;
use crate::domain::Service;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service>,
    /// Bearer token for admin routes; `None` leaves them open
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: Arc<Service>, admin_token: Option<&str>) -> Self {
        let admin_token = admin_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Arc::from);
        if admin_token.is_none() {
            tracing::warn!("No admin token configured, admin routes are unauthenticated");
        }
        Self {
            service,
            admin_token,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Venue Service API"),
    components(schemas(
        ErrorBody,
        BookingRequest,
        BookingDto,
        BookingResponse,
        BookingListResponse,
        BookingStatusRequest,
        BookingStatusResponse,
        EventDto,
        EventRequest,
        EventListResponse,
        EventResponse,
        GalleryAssetDto,
        CreateGalleryAssetRequest,
        ReorderRequest,
        GalleryListResponse,
        GalleryAssetResponse,
        PageDto,
        SavePageRequest,
        PageResponse,
        SiteSettingsDto,
        SiteSettingsResponse,
        FaqDto,
        FaqRequest,
        FaqListResponse,
        FaqResponse,
        TestimonialDto,
        TestimonialRequest,
        TestimonialListResponse,
        TestimonialResponse,
        ServiceDetailDto,
        ServiceDetailRequest,
        ServiceDetailListResponse,
        ServiceDetailResponse,
        DeleteResponse,
        SuccessResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// API routes without middleware
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/openapi.json", get(openapi_json))
        // Bookings
        .route("/api/booking", post(handlers::submit_booking))
        .route("/api/bookings-admin", get(handlers::list_bookings))
        .route(
            "/api/bookings-admin/{id}/status",
            put(handlers::update_booking_status),
        )
        // Events
        .route(
            "/api/events",
            get(handlers::list_events)
                .post(handlers::create_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        // Gallery
        .route(
            "/api/gallery",
            get(handlers::list_gallery)
                .post(handlers::create_gallery_asset)
                .delete(handlers::delete_gallery_asset),
        )
        .route("/api/gallery/upload", post(handlers::upload_media))
        .route("/api/gallery/reorder", post(handlers::reorder_gallery))
        // Singletons
        .route("/api/pages", get(handlers::get_page).post(handlers::save_page))
        .route(
            "/api/settings",
            get(handlers::get_settings).post(handlers::save_settings),
        )
        // Service details
        .route(
            "/api/service-details",
            get(handlers::get_service_details).post(handlers::upsert_service_detail),
        )
        // FAQ
        .route(
            "/api/faqs",
            get(handlers::list_faqs)
                .post(handlers::create_faq)
                .put(handlers::update_faq)
                .delete(handlers::delete_faq),
        )
        // Testimonials
        .route(
            "/api/testimonials",
            get(handlers::list_testimonials)
                .post(handlers::create_testimonial)
                .delete(handlers::delete_testimonial),
        )
}

/// Full router: API routes, optional static media, CORS, tracing and body limit
pub fn build_router(state: AppState, server: &ServerConfig, media_dir: Option<&Path>) -> Router {
    let mut router = api_routes();
    if let Some(dir) = media_dir {
        router = router.nest_service("/media", ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::IF_NONE_MATCH,
            HeaderName::from_static(handlers::IDEMPOTENCY_KEY),
        ])
        .expose_headers([header::ETAG]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
