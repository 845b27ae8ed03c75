//! SeaORM repository implementations

use crate::contract::{
    Booking, BookingStatus, Event, Faq, GalleryAsset, Page, ServiceDetail, SiteSettings,
    Testimonial,
};
use crate::domain::repository::{
    BookingRepository, EventRepository, FaqRepository, GalleryRepository, PageRepository,
    ServiceDetailRepository, SiteSettingsRepository, TestimonialRepository, WriteConflict,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{
    booking, event, faq, gallery_asset, page, service_detail, site_settings, testimonial,
};
use super::mapper;

/// Unique-key violations become [`WriteConflict`]; everything else passes through
fn conflict_on_unique(err: DbErr, resource: &'static str) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => WriteConflict::on(resource),
        _ => err.into(),
    }
}

// ===== Booking Repository =====

pub struct SeaOrmBookingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBookingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        let active: booking::ActiveModel = booking.into();
        let model = active
            .insert(&*self.db)
            .await
            .map_err(|e| conflict_on_unique(e, "booking"))?;
        model.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Booking>> {
        booking::Entity::find()
            .filter(booking::Column::IdempotencyKey.eq(key))
            .one(&*self.db)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list(
        &self,
        status: Option<BookingStatus>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Booking>> {
        let mut query = booking::Entity::find();
        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }

        let results = query
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>>>()
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Option<Booking>> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(status.as_str()))
            .filter(booking::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

// ===== Event Repository =====

pub struct SeaOrmEventRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEventRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for SeaOrmEventRepository {
    async fn list(&self) -> Result<Vec<Event>> {
        let results = event::Entity::find()
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Time)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create(&self, event: &Event) -> Result<Event> {
        let active: event::ActiveModel = event.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn update(&self, event: &Event) -> Result<Option<Event>> {
        if event::Entity::find_by_id(event.id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        match mapper::event_update(event).update(&*self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // Deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = event::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Gallery Repository =====

pub struct SeaOrmGalleryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGalleryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GalleryRepository for SeaOrmGalleryRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<GalleryAsset>> {
        let mut query = gallery_asset::Entity::find();
        if let Some(category) = category {
            query = query.filter(gallery_asset::Column::Category.eq(category));
        }

        let results = query
            .order_by_asc(gallery_asset::Column::Position)
            .order_by_asc(gallery_asset::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GalleryAsset>> {
        let result = gallery_asset::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn create(&self, asset: &GalleryAsset) -> Result<GalleryAsset> {
        let active: gallery_asset::ActiveModel = asset.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = gallery_asset::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn set_positions(&self, positions: &[(Uuid, i32)]) -> Result<()> {
        let txn = self.db.begin().await?;
        for (id, position) in positions {
            gallery_asset::Entity::update_many()
                .col_expr(gallery_asset::Column::Position, Expr::value(*position))
                .filter(gallery_asset::Column::Id.eq(*id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }
}

// ===== Page Repository =====

pub struct SeaOrmPageRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPageRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PageRepository for SeaOrmPageRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        let result = page::Entity::find()
            .filter(page::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, page: &Page) -> Result<Page> {
        let active: page::ActiveModel = page.into();
        let model = active
            .insert(&*self.db)
            .await
            .map_err(|e| conflict_on_unique(e, "page"))?;
        Ok(model.into())
    }

    async fn update_if_unchanged(
        &self,
        page: &Page,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<Page> {
        // Compare-and-set on updated_at
        let result = page::Entity::update_many()
            .col_expr(page::Column::Content, Expr::value(page.content.clone()))
            .col_expr(page::Column::UpdatedAt, Expr::value(page.updated_at))
            .filter(page::Column::Id.eq(page.id))
            .filter(page::Column::UpdatedAt.eq(expected_updated_at))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(WriteConflict::on("page"));
        }
        Ok(page.clone())
    }
}

// ===== Site Settings Repository =====

pub struct SeaOrmSiteSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSiteSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SiteSettingsRepository for SeaOrmSiteSettingsRepository {
    async fn get(&self) -> Result<Option<SiteSettings>> {
        let result = site_settings::Entity::find_by_id(site_settings::SINGLETON_ID)
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn save(&self, settings: &SiteSettings) -> Result<SiteSettings> {
        let existing = site_settings::Entity::find_by_id(site_settings::SINGLETON_ID)
            .one(&*self.db)
            .await?;

        let active: site_settings::ActiveModel = settings.into();
        let model = if existing.is_some() {
            active.update(&*self.db).await?
        } else {
            active
                .insert(&*self.db)
                .await
                .map_err(|e| conflict_on_unique(e, "site settings"))?
        };

        Ok(model.into())
    }
}

// ===== FAQ Repository =====

pub struct SeaOrmFaqRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmFaqRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FaqRepository for SeaOrmFaqRepository {
    async fn list(&self) -> Result<Vec<Faq>> {
        let results = faq::Entity::find()
            .order_by_asc(faq::Column::Position)
            .order_by_asc(faq::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create(&self, faq: &Faq) -> Result<Faq> {
        let active: faq::ActiveModel = faq.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn update(&self, faq: &Faq) -> Result<Option<Faq>> {
        match mapper::faq_update(faq).update(&*self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = faq::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Testimonial Repository =====

pub struct SeaOrmTestimonialRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTestimonialRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TestimonialRepository for SeaOrmTestimonialRepository {
    async fn list(&self, published_only: bool) -> Result<Vec<Testimonial>> {
        let mut query = testimonial::Entity::find();
        if published_only {
            query = query.filter(testimonial::Column::Published.eq(true));
        }

        let results = query
            .order_by_asc(testimonial::Column::Position)
            .order_by_asc(testimonial::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(Testimonial::try_from)
            .collect::<Result<Vec<_>>>()
    }

    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        let active: testimonial::ActiveModel = testimonial.into();
        active.insert(&*self.db).await?.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = testimonial::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Service Detail Repository =====

pub struct SeaOrmServiceDetailRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmServiceDetailRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceDetailRepository for SeaOrmServiceDetailRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<ServiceDetail>> {
        service_detail::Entity::find()
            .filter(service_detail::Column::Name.eq(name))
            .one(&*self.db)
            .await?
            .map(ServiceDetail::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<ServiceDetail>> {
        let results = service_detail::Entity::find()
            .order_by_asc(service_detail::Column::Name)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(ServiceDetail::try_from)
            .collect::<Result<Vec<_>>>()
    }

    async fn upsert(&self, detail: &ServiceDetail) -> Result<ServiceDetail> {
        let existing = service_detail::Entity::find()
            .filter(service_detail::Column::Name.eq(&detail.name))
            .one(&*self.db)
            .await?;

        let mut active: service_detail::ActiveModel = detail.into();
        let model = match existing {
            Some(current) => {
                active.id = sea_orm::ActiveValue::Unchanged(current.id);
                active.update(&*self.db).await?
            }
            None => active
                .insert(&*self.db)
                .await
                .map_err(|e| conflict_on_unique(e, "service detail"))?,
        };

        model.try_into()
    }
}
