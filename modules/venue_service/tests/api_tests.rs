//! HTTP-level tests through the full router

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use venue_service::api::rest::{build_router, AppState};
use venue_service::config::ServerConfig;

const ADMIN_TOKEN: &str = "s3cret-admin-token";

fn router(ctx: &TestContext) -> Router {
    let state = AppState::new(ctx.service.clone(), Some(ADMIN_TOKEN));
    build_router(state, &ServerConfig::default(), None)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin(mut request: Request<Body>) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", ADMIN_TOKEN).parse().unwrap(),
    );
    request
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = create_test_service();
    let (status, body) = send(&router(&ctx), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn example_booking_is_accepted() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/booking", &example_booking_json()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["booking"]["status"], "new");
    assert_eq!(body["booking"]["eventType"], "party");
    assert_eq!(body["booking"]["eventDate"], "2025-12-20");
    assert_eq!(body["booking"]["guestCount"], 50);
    assert_eq!(ctx.bookings.count(), 1);
}

#[tokio::test]
async fn booking_without_name_is_a_bad_request() {
    let ctx = create_test_service();
    let mut payload = example_booking_json();
    payload["name"] = json!("");

    let (status, body) = send(
        &router(&ctx),
        json_request(Method::POST, "/api/booking", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
    assert_eq!(ctx.bookings.count(), 0);
}

#[tokio::test]
async fn booking_with_malformed_json_is_a_bad_request() {
    let ctx = create_test_service();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/booking")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&router(&ctx), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn booking_succeeds_when_mail_is_down() {
    let ctx = create_test_service();
    ctx.mailer.set_failing(true);

    let (status, body) = send(
        &router(&ctx),
        json_request(Method::POST, "/api/booking", &example_booking_json()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "new");
    assert_eq!(ctx.bookings.count(), 1);
}

#[tokio::test]
async fn storage_failure_returns_generic_error() {
    let ctx = create_test_service();
    ctx.bookings.set_failing(true);

    let (status, body) = send(
        &router(&ctx),
        json_request(Method::POST, "/api/booking", &example_booking_json()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("connection refused"), "{}", message);
}

#[tokio::test]
async fn idempotency_key_collapses_resubmissions() {
    let ctx = create_test_service();
    let app = router(&ctx);
    let request = || {
        let mut request = json_request(Method::POST, "/api/booking", &example_booking_json());
        request
            .headers_mut()
            .insert("idempotency-key", "checkout-42".parse().unwrap());
        request
    };

    let (_, first) = send(&app, request()).await;
    let (status, second) = send(&app, request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["booking"]["id"], second["booking"]["id"]);
    assert_eq!(ctx.bookings.count(), 1);
}

#[tokio::test]
async fn list_endpoints_revalidate_with_etag() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let response = app.clone().oneshot(get("/api/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let etag = response
        .headers()
        .get(header::ETAG)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let revalidate = Request::builder()
        .uri("/api/events")
        .header(header::IF_NONE_MATCH, &etag)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(revalidate).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    // A change produces a new token
    let event = json!({
        "title": "Jazz night",
        "description": "Live band",
        "date": "2025-11-01",
        "featured": true
    });
    let (status, _) = send(&app, admin(json_request(Method::POST, "/api/events", &event))).await;
    assert_eq!(status, StatusCode::CREATED);

    let stale = Request::builder()
        .uri("/api/events")
        .header(header::IF_NONE_MATCH, &etag)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(stale).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_ne!(response.headers().get(header::ETAG).unwrap(), etag.as_str());
}

#[tokio::test]
async fn admin_routes_require_the_bearer_token() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let (status, body) = send(&app, get("/api/bookings-admin")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let wrong = Request::builder()
        .uri("/api/bookings-admin")
        .header(header::AUTHORIZATION, "Bearer guess")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        json_request(Method::POST, "/api/booking", &example_booking_json()),
    )
    .await;
    let (status, body) = send(&app, admin(get("/api/bookings-admin?status=new"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["status"], "new");
}

#[tokio::test]
async fn routes_are_open_without_configured_token() {
    let ctx = create_test_service();
    let app = build_router(
        AppState::new(ctx.service.clone(), None),
        &ServerConfig::default(),
        None,
    );

    let (status, _) = send(&app, get("/api/bookings-admin")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let ctx = create_test_service();
    let (status, _) = send(&router(&ctx), admin(get("/api/bookings-admin?status=archived"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_status_can_be_changed() {
    let ctx = create_test_service();
    let app = router(&ctx);
    let (_, created) = send(
        &app,
        json_request(Method::POST, "/api/booking", &example_booking_json()),
    )
    .await;
    let id = created["booking"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        admin(json_request(
            Method::PUT,
            &format!("/api/bookings-admin/{}/status", id),
            &json!({ "status": "confirmed" }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "confirmed");

    let (status, body) = send(
        &app,
        admin(json_request(
            Method::PUT,
            &format!("/api/bookings-admin/{}/status", Uuid::new_v4()),
            &json!({ "status": "cancelled" }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["booking"].is_null());
}

#[tokio::test]
async fn malformed_booking_id_returns_json_error() {
    let ctx = create_test_service();
    let (status, body) = send(
        &router(&ctx),
        admin(json_request(
            Method::PUT,
            "/api/bookings-admin/not-a-uuid/status",
            &json!({ "status": "confirmed" }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{}", body);
}

#[tokio::test]
async fn upload_without_multipart_body_returns_json_error() {
    let ctx = create_test_service();
    let (status, body) = send(
        &router(&ctx),
        admin(json_request(
            Method::POST,
            "/api/gallery/upload",
            &json!({ "file": "hall.jpg" }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{}", body);
    assert!(ctx.store.keys().is_empty());
}

#[tokio::test]
async fn oversized_booking_body_is_payload_too_large() {
    let ctx = create_test_service();
    let server = ServerConfig {
        body_limit_bytes: 1024,
        ..ServerConfig::default()
    };
    let app = build_router(AppState::new(ctx.service.clone(), Some(ADMIN_TOKEN)), &server, None);

    let mut booking = example_booking_json();
    booking["message"] = json!("x".repeat(4096));
    let (status, body) = send(&app, json_request(Method::POST, "/api/booking", &booking)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string(), "{}", body);
    assert_eq!(ctx.bookings.count(), 0);
}

#[tokio::test]
async fn home_page_defaults_then_rejects_stale_write() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let (status, page) = send(&app, get("/api/pages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["isDefault"], true);
    assert_eq!(page["slug"], "home");

    let (status, saved) = send(
        &app,
        admin(json_request(
            Method::POST,
            "/api/pages",
            &json!({ "content": { "hero": { "title": "Welcome" } } }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated_at = saved["page"]["updatedAt"].clone();

    let (status, body) = send(
        &app,
        admin(json_request(
            Method::POST,
            "/api/pages",
            &json!({
                "content": { "hero": { "title": "Overwrite" } },
                "lastUpdatedAt": "2000-01-01T00:00:00Z"
            }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, page) = send(&app, get("/api/pages")).await;
    assert_eq!(page["content"]["hero"]["title"], "Welcome");
    assert_eq!(page["isDefault"], false);

    let (status, _) = send(
        &app,
        admin(json_request(
            Method::POST,
            "/api/pages",
            &json!({
                "content": { "hero": { "title": "Fresh edit" } },
                "lastUpdatedAt": updated_at
            }),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gallery_delete_of_unknown_id_succeeds() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let (status, body) = send(
        &app,
        admin(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/gallery?id={}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], false);

    let (status, _) = send(
        &app,
        admin(
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/gallery?id=not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn multipart_upload_creates_gallery_asset() {
    let ctx = create_test_service();
    let boundary = "venue-boundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"category\"\r\n\r\n\
         weddings\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"hall.png\"\r\n\
         Content-Type: image/png\r\n\r\n\
         PNGDATA\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = admin(
        Request::builder()
            .method(Method::POST)
            .uri("/api/gallery/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap(),
    );

    let (status, body) = send(&router(&ctx), request).await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["asset"]["category"], "weddings");
    let key = body["asset"]["key"].as_str().unwrap();
    assert!(key.starts_with("gallery/weddings/hall-"));
    assert_eq!(ctx.store.keys(), vec![key.to_string()]);
}

#[tokio::test]
async fn unknown_service_detail_is_not_found() {
    let ctx = create_test_service();
    let (status, body) = send(&router(&ctx), get("/api/service-details?name=catering")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn full_testimonial_listing_is_admin_only() {
    let ctx = create_test_service();
    let app = router(&ctx);

    let (status, _) = send(&app, get("/api/testimonials?all=true")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, admin(get("/api/testimonials?all=true"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/api/testimonials")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let ctx = create_test_service();
    let (status, body) = send(&router(&ctx), get("/api/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["components"]["schemas"]["BookingRequest"].is_object());
}
