//! Common test utilities: in-memory repositories, mailer and object store
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use venue_service::contract::*;
use venue_service::domain::repository::{
    BookingRepository, EventRepository, FaqRepository, GalleryRepository, PageRepository,
    ServiceDetailRepository, SiteSettingsRepository, TestimonialRepository, WriteConflict,
};
use venue_service::domain::{
    BookingNotifier, Email, InlineNotifier, Mailer, NotificationError, ObjectStore, PublicUrls, Repositories,
    Service, ServiceOptions,
};

pub const OPERATOR_EMAIL: &str = "office@venue.ro";
pub const MEDIA_BASE: &str = "https://cdn.venue.ro/media";

/// The example booking from the public form
pub fn example_submission() -> BookingSubmission {
    BookingSubmission {
        name: Some("Ion Popescu".to_string()),
        email: Some("ion@test.ro".to_string()),
        phone: Some("0712345678".to_string()),
        event_date: Some("2025-12-20".to_string()),
        event_type: Some("party".to_string()),
        guest_count: Some(json!(50)),
        message: None,
    }
}

pub fn example_booking_json() -> serde_json::Value {
    json!({
        "name": "Ion Popescu",
        "email": "ion@test.ro",
        "phone": "0712345678",
        "eventDate": "2025-12-20",
        "eventType": "party",
        "guestCount": 50
    })
}

// ===== Repositories =====

#[derive(Default)]
pub struct MockBookingRepo {
    data: RwLock<HashMap<Uuid, Booking>>,
    failing: AtomicBool,
}

impl MockBookingRepo {
    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn all(&self) -> Vec<Booking> {
        self.data.read().values().cloned().collect()
    }

    /// Make every subsequent call fail like an unreachable database
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepo {
    async fn create(&self, booking: &Booking) -> anyhow::Result<Booking> {
        self.check()?;
        let mut data = self.data.write();
        if let Some(key) = &booking.idempotency_key {
            if data
                .values()
                .any(|b| b.idempotency_key.as_deref() == Some(key.as_str()))
            {
                return Err(WriteConflict::on("bookings"));
            }
        }
        data.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Booking>> {
        self.check()?;
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_idempotency_key(&self, key: &str) -> anyhow::Result<Option<Booking>> {
        self.check()?;
        Ok(self
            .data
            .read()
            .values()
            .find(|b| b.idempotency_key.as_deref() == Some(key))
            .cloned())
    }

    async fn list(
        &self,
        status: Option<BookingStatus>,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<Vec<Booking>> {
        self.check()?;
        let mut items: Vec<Booking> = self
            .data
            .read()
            .values()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> anyhow::Result<Option<Booking>> {
        self.check()?;
        Ok(self.data.write().get_mut(&id).map(|b| {
            b.status = status;
            b.clone()
        }))
    }
}

#[derive(Default)]
pub struct MockEventRepo {
    data: RwLock<HashMap<Uuid, Event>>,
}

#[async_trait]
impl EventRepository for MockEventRepo {
    async fn list(&self) -> anyhow::Result<Vec<Event>> {
        let mut items: Vec<Event> = self.data.read().values().cloned().collect();
        items.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(items)
    }

    async fn create(&self, event: &Event) -> anyhow::Result<Event> {
        self.data.write().insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn update(&self, event: &Event) -> anyhow::Result<Option<Event>> {
        let mut data = self.data.write();
        Ok(data.get_mut(&event.id).map(|stored| {
            *stored = Event {
                created_at: stored.created_at,
                ..event.clone()
            };
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MockGalleryRepo {
    data: RwLock<HashMap<Uuid, GalleryAsset>>,
    failing_creates: AtomicBool,
}

impl MockGalleryRepo {
    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn set_failing_creates(&self, failing: bool) {
        self.failing_creates.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl GalleryRepository for MockGalleryRepo {
    async fn list(&self, category: Option<&str>) -> anyhow::Result<Vec<GalleryAsset>> {
        let mut items: Vec<GalleryAsset> = self
            .data
            .read()
            .values()
            .filter(|a| category.map_or(true, |c| a.category == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<GalleryAsset>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn create(&self, asset: &GalleryAsset) -> anyhow::Result<GalleryAsset> {
        if self.failing_creates.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.data.write().insert(asset.id, asset.clone());
        Ok(asset.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }

    async fn set_positions(&self, positions: &[(Uuid, i32)]) -> anyhow::Result<()> {
        let mut data = self.data.write();
        for (id, position) in positions {
            if let Some(asset) = data.get_mut(id) {
                asset.position = *position;
            }
        }
        Ok(())
    }
}

/// Page store honouring the conditional update; can inject lost races
#[derive(Default)]
pub struct MockPageRepo {
    data: RwLock<HashMap<String, Page>>,
    forced_conflicts: AtomicU32,
    update_calls: AtomicU32,
}

impl MockPageRepo {
    /// The next `n` conditional updates fail as if another writer won
    pub fn force_conflicts(&self, n: u32) {
        self.forced_conflicts.store(n, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, slug: &str) -> Option<Page> {
        self.data.read().get(slug).cloned()
    }
}

#[async_trait]
impl PageRepository for MockPageRepo {
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Page>> {
        Ok(self.data.read().get(slug).cloned())
    }

    async fn insert(&self, page: &Page) -> anyhow::Result<Page> {
        let mut data = self.data.write();
        if data.contains_key(&page.slug) {
            return Err(WriteConflict::on("pages"));
        }
        data.insert(page.slug.clone(), page.clone());
        Ok(page.clone())
    }

    async fn update_if_unchanged(
        &self,
        page: &Page,
        expected_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<Page> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let forced = self
            .forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if forced {
            return Err(WriteConflict::on("pages"));
        }

        let mut data = self.data.write();
        match data.get_mut(&page.slug) {
            Some(stored) if stored.updated_at == expected_updated_at => {
                stored.content = page.content.clone();
                stored.updated_at = page.updated_at;
                Ok(stored.clone())
            }
            _ => Err(WriteConflict::on("pages")),
        }
    }
}

#[derive(Default)]
pub struct MockSettingsRepo {
    data: RwLock<Option<SiteSettings>>,
}

#[async_trait]
impl SiteSettingsRepository for MockSettingsRepo {
    async fn get(&self) -> anyhow::Result<Option<SiteSettings>> {
        Ok(self.data.read().clone())
    }

    async fn save(&self, settings: &SiteSettings) -> anyhow::Result<SiteSettings> {
        *self.data.write() = Some(settings.clone());
        Ok(settings.clone())
    }
}

#[derive(Default)]
pub struct MockFaqRepo {
    data: RwLock<HashMap<Uuid, Faq>>,
}

#[async_trait]
impl FaqRepository for MockFaqRepo {
    async fn list(&self) -> anyhow::Result<Vec<Faq>> {
        let mut items: Vec<Faq> = self.data.read().values().cloned().collect();
        items.sort_by_key(|f| f.position);
        Ok(items)
    }

    async fn create(&self, faq: &Faq) -> anyhow::Result<Faq> {
        self.data.write().insert(faq.id, faq.clone());
        Ok(faq.clone())
    }

    async fn update(&self, faq: &Faq) -> anyhow::Result<Option<Faq>> {
        let mut data = self.data.write();
        Ok(data.get_mut(&faq.id).map(|stored| {
            *stored = Faq {
                created_at: stored.created_at,
                ..faq.clone()
            };
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MockTestimonialRepo {
    data: RwLock<HashMap<Uuid, Testimonial>>,
}

#[async_trait]
impl TestimonialRepository for MockTestimonialRepo {
    async fn list(&self, published_only: bool) -> anyhow::Result<Vec<Testimonial>> {
        let mut items: Vec<Testimonial> = self
            .data
            .read()
            .values()
            .filter(|t| !published_only || t.published)
            .cloned()
            .collect();
        items.sort_by_key(|t| t.position);
        Ok(items)
    }

    async fn create(&self, testimonial: &Testimonial) -> anyhow::Result<Testimonial> {
        self.data.write().insert(testimonial.id, testimonial.clone());
        Ok(testimonial.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MockServiceDetailRepo {
    data: RwLock<HashMap<String, ServiceDetail>>,
}

#[async_trait]
impl ServiceDetailRepository for MockServiceDetailRepo {
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<ServiceDetail>> {
        Ok(self.data.read().get(name).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<ServiceDetail>> {
        let mut items: Vec<ServiceDetail> = self.data.read().values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn upsert(&self, detail: &ServiceDetail) -> anyhow::Result<ServiceDetail> {
        self.data.write().insert(detail.name.clone(), detail.clone());
        Ok(detail.clone())
    }
}

// ===== Mail and media =====

/// Mailer whose sends block until the test opens the gate
pub struct GatedMailer {
    gate: tokio::sync::Semaphore,
    entered: tokio::sync::Notify,
    sent: Mutex<Vec<Email>>,
}

impl Default for GatedMailer {
    fn default() -> Self {
        Self {
            gate: tokio::sync::Semaphore::new(0),
            entered: tokio::sync::Notify::new(),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl GatedMailer {
    /// Wait until a send is blocked on the gate
    pub async fn wait_for_send(&self) {
        self.entered.notified().await;
    }

    pub fn open(&self) {
        self.gate.add_permits(16);
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for GatedMailer {
    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        self.entered.notify_one();
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        self.sent.lock().push(email.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
    failing: AtomicBool,
}

impl MemoryMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().clone()
    }

    /// Reject every message like an unreachable provider
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Rejected {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        self.sent.lock().push(email.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    failing_puts: AtomicBool,
}

impl MemoryObjectStore {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.objects.write().insert(key.to_string(), data.to_vec());
    }

    pub fn set_failing_puts(&self, failing: bool) {
        self.failing_puts.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, data: &[u8], _content_type: &str) -> anyhow::Result<()> {
        if self.failing_puts.load(Ordering::SeqCst) {
            anyhow::bail!("bucket unavailable");
        }
        self.insert(key, data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.objects.write().remove(key);
        Ok(())
    }
}

// ===== Service builder =====

/// Service over in-memory collaborators, with handles to inspect them
pub struct TestContext {
    pub service: Arc<Service>,
    pub bookings: Arc<MockBookingRepo>,
    pub gallery: Arc<MockGalleryRepo>,
    pub pages: Arc<MockPageRepo>,
    pub mailer: Arc<MemoryMailer>,
    pub store: Arc<MemoryObjectStore>,
}

pub fn test_options() -> ServiceOptions {
    ServiceOptions {
        site_name: "Sala Venue".to_string(),
        operator_email: Some(OPERATOR_EMAIL.to_string()),
        page_save_attempts: 3,
        page_save_backoff: Duration::from_millis(1),
        public_urls: PublicUrls::new(MEDIA_BASE),
        max_upload_bytes: 1024,
    }
}

pub fn create_test_service() -> TestContext {
    create_test_service_with(test_options())
}

pub fn create_test_service_with(options: ServiceOptions) -> TestContext {
    let mailer = Arc::new(MemoryMailer::default());
    build_context(options, mailer.clone(), Arc::new(InlineNotifier::new(mailer)))
}

/// Service whose bookings go through the given notifier
pub fn create_test_service_with_notifier(notifier: Arc<dyn BookingNotifier>) -> TestContext {
    build_context(test_options(), Arc::new(MemoryMailer::default()), notifier)
}

fn build_context(
    options: ServiceOptions,
    mailer: Arc<MemoryMailer>,
    notifier: Arc<dyn BookingNotifier>,
) -> TestContext {
    let bookings = Arc::new(MockBookingRepo::default());
    let gallery = Arc::new(MockGalleryRepo::default());
    let pages = Arc::new(MockPageRepo::default());
    let store = Arc::new(MemoryObjectStore::default());

    let repos = Repositories {
        bookings: bookings.clone(),
        events: Arc::new(MockEventRepo::default()),
        gallery: gallery.clone(),
        pages: pages.clone(),
        settings: Arc::new(MockSettingsRepo::default()),
        faqs: Arc::new(MockFaqRepo::default()),
        testimonials: Arc::new(MockTestimonialRepo::default()),
        service_details: Arc::new(MockServiceDetailRepo::default()),
    };

    let service = Arc::new(Service::new(
        repos,
        store.clone(),
        notifier,
        options,
    ));

    TestContext {
        service,
        bookings,
        gallery,
        pages,
        mailer,
        store,
    }
}
