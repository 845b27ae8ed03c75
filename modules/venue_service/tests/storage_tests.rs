//! SeaORM repositories against an in-memory SQLite database

mod common;

use chrono::{Duration, NaiveDate, SubsecRound, Utc};
use common::*;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use venue_service::contract::*;
use venue_service::domain::repository::is_write_conflict;
use sea_orm_migration::MigratorTrait;
use venue_service::domain::{InlineNotifier, Repositories, Service};
use venue_service::infra::storage::migrations::Migrator;
use venue_service::module;

async fn sqlite() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // One connection so every query sees the same in-memory database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    module::migrate(&db).await.unwrap();
    Arc::new(db)
}

async fn repos() -> Repositories {
    module::repositories(sqlite().await)
}

fn booking(key: Option<&str>, minutes_ago: i64) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        name: "Ion Popescu".to_string(),
        email: "ion@test.ro".to_string(),
        phone: "0712345678".to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        event_type: EventType::Party,
        guest_count: Some(50),
        message: Some("Birthday for 50 people".to_string()),
        status: BookingStatus::New,
        idempotency_key: key.map(str::to_string),
        created_at: Utc::now().trunc_subsecs(3) - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn migrations_apply_once_per_version() {
    let db = sqlite().await;
    module::migrate(&db).await.unwrap();

    let applied: Vec<String> = Migrator::get_applied_migrations(db.as_ref())
        .await
        .unwrap()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(
        applied,
        vec![
            "m20241215_000001_create_bookings",
            "m20241215_000002_create_content",
            "m20241215_000003_create_gallery_assets",
        ]
    );
}

#[tokio::test]
async fn bookings_round_trip_and_list_newest_first() {
    let repos = repos().await;
    let older = booking(None, 10);
    let newer = booking(None, 1);
    repos.bookings.create(&older).await.unwrap();
    repos.bookings.create(&newer).await.unwrap();

    let found = repos.bookings.find_by_id(older.id).await.unwrap().unwrap();
    assert_eq!(found, older);

    let listed = repos.bookings.list(None, 10, 0).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let updated = repos
        .bookings
        .update_status(older.id, BookingStatus::Confirmed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Confirmed);

    let confirmed = repos
        .bookings
        .list(Some(BookingStatus::Confirmed), 10, 0)
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, older.id);

    assert!(repos
        .bookings
        .update_status(Uuid::new_v4(), BookingStatus::Cancelled)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_idempotency_key_is_a_write_conflict() {
    let repos = repos().await;
    repos
        .bookings
        .create(&booking(Some("form-1"), 0))
        .await
        .unwrap();

    let err = repos
        .bookings
        .create(&booking(Some("form-1"), 0))
        .await
        .unwrap_err();
    assert!(is_write_conflict(&err), "{:?}", err);

    let existing = repos
        .bookings
        .find_by_idempotency_key("form-1")
        .await
        .unwrap();
    assert!(existing.is_some());
}

#[tokio::test]
async fn page_update_requires_unchanged_timestamp() {
    let repos = repos().await;
    let now = Utc::now().trunc_subsecs(3);
    let page = Page {
        id: Uuid::new_v4(),
        slug: "home".to_string(),
        content: json!({ "hero": { "title": "v1" } }),
        created_at: now,
        updated_at: now,
    };
    repos.pages.insert(&page).await.unwrap();

    let err = repos.pages.insert(&page).await.unwrap_err();
    assert!(is_write_conflict(&err));

    let v2 = Page {
        content: json!({ "hero": { "title": "v2" } }),
        updated_at: now + Duration::milliseconds(5),
        ..page.clone()
    };
    let err = repos
        .pages
        .update_if_unchanged(&v2, now - Duration::seconds(1))
        .await
        .unwrap_err();
    assert!(is_write_conflict(&err));

    let saved = repos.pages.update_if_unchanged(&v2, now).await.unwrap();
    assert_eq!(saved.content["hero"]["title"], "v2");
    assert_eq!(saved.updated_at, v2.updated_at);

    let stored = repos.pages.find_by_slug("home").await.unwrap().unwrap();
    assert_eq!(stored, saved);
}

#[tokio::test]
async fn gallery_positions_and_categories() {
    let repos = repos().await;
    let now = Utc::now().trunc_subsecs(3);
    let mut ids = Vec::new();
    for (i, category) in ["weddings", "parties", "weddings"].iter().enumerate() {
        let asset = GalleryAsset {
            id: Uuid::new_v4(),
            title: format!("asset {}", i),
            alt: None,
            url: format!("{}/gallery/{}/asset-{}.jpg", MEDIA_BASE, category, i),
            key: Some(format!("gallery/{}/asset-{}.jpg", category, i)),
            category: category.to_string(),
            position: i as i32,
            created_at: now,
        };
        repos.gallery.create(&asset).await.unwrap();
        ids.push(asset.id);
    }

    repos
        .gallery
        .set_positions(&[(ids[2], 0), (ids[0], 1), (ids[1], 2), (Uuid::new_v4(), 3)])
        .await
        .unwrap();

    let order: Vec<Uuid> = repos
        .gallery
        .list(None)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(order, vec![ids[2], ids[0], ids[1]]);

    let weddings = repos.gallery.list(Some("weddings")).await.unwrap();
    assert_eq!(weddings.len(), 2);

    assert!(repos.gallery.delete(ids[1]).await.unwrap());
    assert!(!repos.gallery.delete(ids[1]).await.unwrap());
}

#[tokio::test]
async fn settings_singleton_is_replaced() {
    let repos = repos().await;
    assert!(repos.settings.get().await.unwrap().is_none());

    let first = SiteSettings {
        site_name: "Sala Mare".to_string(),
        updated_at: Some(Utc::now().trunc_subsecs(3)),
        ..SiteSettings::default()
    };
    repos.settings.save(&first).await.unwrap();
    let second = SiteSettings {
        site_name: "Sala Mica".to_string(),
        booking_notification_email: Some("office@sala.ro".to_string()),
        ..first.clone()
    };
    repos.settings.save(&second).await.unwrap();

    assert_eq!(repos.settings.get().await.unwrap(), Some(second));
}

#[tokio::test]
async fn events_update_and_delete() {
    let repos = repos().await;
    let created_at = Utc::now().trunc_subsecs(3) - Duration::days(1);
    let event = Event {
        id: Uuid::new_v4(),
        title: "Jazz night".to_string(),
        description: "Live band".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        time: Some("20:00".to_string()),
        image_url: None,
        category: Some("music".to_string()),
        featured: false,
        created_at,
        updated_at: created_at,
    };
    repos.events.create(&event).await.unwrap();

    let now = Utc::now().trunc_subsecs(3);
    let changed = Event {
        title: "Jazz & wine".to_string(),
        featured: true,
        created_at: now,
        updated_at: now,
        ..event.clone()
    };
    let updated = repos.events.update(&changed).await.unwrap().unwrap();
    assert_eq!(updated.title, "Jazz & wine");
    assert_eq!(updated.created_at, created_at);

    let ghost = Event {
        id: Uuid::new_v4(),
        ..changed.clone()
    };
    assert!(repos.events.update(&ghost).await.unwrap().is_none());

    assert!(repos.events.delete(event.id).await.unwrap());
    assert!(repos.events.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn service_detail_upsert_keeps_id_and_images() {
    let repos = repos().await;
    let detail = ServiceDetail {
        id: Uuid::new_v4(),
        name: "catering".to_string(),
        description: "Menus".to_string(),
        images: vec!["https://images.example.com/a.jpg".to_string()],
        updated_at: Utc::now().trunc_subsecs(3),
    };
    repos.service_details.upsert(&detail).await.unwrap();

    let replacement = ServiceDetail {
        id: Uuid::new_v4(),
        description: "Seasonal menus".to_string(),
        images: vec![
            "https://images.example.com/b.jpg".to_string(),
            "https://images.example.com/c.jpg".to_string(),
        ],
        ..detail.clone()
    };
    let saved = repos.service_details.upsert(&replacement).await.unwrap();

    assert_eq!(saved.id, detail.id);
    assert_eq!(saved.images.len(), 2);
    let listed = repos.service_details.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "Seasonal menus");
}

#[tokio::test]
async fn faq_and_testimonials_are_ordered_by_position() {
    let repos = repos().await;
    let now = Utc::now().trunc_subsecs(3);
    for (position, question) in [(1, "Second?"), (0, "First?")] {
        repos
            .faqs
            .create(&Faq {
                id: Uuid::new_v4(),
                question: question.to_string(),
                answer: "Yes".to_string(),
                position,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }
    let questions: Vec<String> = repos
        .faqs
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.question)
        .collect();
    assert_eq!(questions, vec!["First?", "Second?"]);

    for (position, published) in [(0, true), (1, false)] {
        repos
            .testimonials
            .create(&Testimonial {
                id: Uuid::new_v4(),
                author: "Maria".to_string(),
                role: Some("Bride".to_string()),
                quote: "Perfect".to_string(),
                rating: 5,
                position,
                published,
                created_at: now,
            })
            .await
            .unwrap();
    }
    assert_eq!(repos.testimonials.list(true).await.unwrap().len(), 1);
    let all = repos.testimonials.list(false).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].rating, 5);
}

#[tokio::test]
async fn service_over_sqlite_keeps_stale_pages_out() {
    let mailer = Arc::new(MemoryMailer::default());
    let service = Service::new(
        repos().await,
        Arc::new(MemoryObjectStore::default()),
        Arc::new(InlineNotifier::new(mailer.clone())),
        test_options(),
    );

    let receipt = service
        .submit_booking(&example_submission(), Some("sqlite-key"))
        .await
        .unwrap();
    let again = service
        .submit_booking(&example_submission(), Some("sqlite-key"))
        .await
        .unwrap();
    assert_eq!(receipt.booking.id, again.booking.id);
    assert_eq!(mailer.sent().len(), 2);

    let saved = service
        .save_home_page(PageWrite {
            content: json!({ "hero": { "title": "Welcome" } }),
            last_updated_at: None,
        })
        .await
        .unwrap();
    let err = service
        .save_home_page(PageWrite {
            content: json!({ "hero": { "title": "Stale" } }),
            last_updated_at: Some(saved.updated_at - Duration::minutes(1)),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VenueError::Conflict { .. }));

    let next = service
        .save_home_page(PageWrite {
            content: json!({ "hero": { "title": "Edited" } }),
            last_updated_at: Some(saved.updated_at),
        })
        .await
        .unwrap();
    assert!(next.updated_at > saved.updated_at);
    assert_eq!(service.home_page().await.unwrap().content["hero"]["title"], "Edited");
}
