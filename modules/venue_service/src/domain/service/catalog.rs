//! Plain content collections: events, FAQ, testimonials, service details.

use super::{next_position, now, storage, Service};
use crate::contract::{
    Event, EventDraft, Faq, FaqDraft, ServiceDetail, ServiceDetailDraft, Testimonial,
    TestimonialDraft, VenueError,
};
use crate::domain::validation::{
    optional_text, validate_event, validate_faq, validate_service_detail, validate_testimonial,
};
use tracing::info;
use uuid::Uuid;

impl Service {
    // ===== Events =====

    pub async fn list_events(&self) -> Result<Vec<Event>, VenueError> {
        self.repos.events.list().await.map_err(storage)
    }

    pub async fn create_event(&self, draft: EventDraft) -> Result<Event, VenueError> {
        validate_event(&draft)?;
        let now = now();
        let event = event_from_draft(Uuid::new_v4(), draft, now);
        let created = self.repos.events.create(&event).await.map_err(storage)?;
        info!(event_id = %created.id, "Event created");
        Ok(created)
    }

    /// `None` when the event does not exist
    pub async fn update_event(
        &self,
        id: Uuid,
        draft: EventDraft,
    ) -> Result<Option<Event>, VenueError> {
        validate_event(&draft)?;
        let event = event_from_draft(id, draft, now());
        let updated = self.repos.events.update(&event).await.map_err(storage)?;
        info!(event_id = %id, found = updated.is_some(), "Event updated");
        Ok(updated)
    }

    /// Idempotent; returns whether a row was removed
    pub async fn delete_event(&self, id: Uuid) -> Result<bool, VenueError> {
        let removed = self.repos.events.delete(id).await.map_err(storage)?;
        info!(event_id = %id, removed, "Event deleted");
        Ok(removed)
    }

    // ===== FAQ =====

    pub async fn list_faqs(&self) -> Result<Vec<Faq>, VenueError> {
        self.repos.faqs.list().await.map_err(storage)
    }

    pub async fn create_faq(&self, draft: FaqDraft) -> Result<Faq, VenueError> {
        validate_faq(&draft)?;
        let position = match draft.position {
            Some(p) => p,
            None => {
                let existing = self.repos.faqs.list().await.map_err(storage)?;
                next_position(existing.iter().map(|f| f.position))
            }
        };
        let now = now();
        let faq = Faq {
            id: Uuid::new_v4(),
            question: draft.question.trim().to_string(),
            answer: draft.answer.trim().to_string(),
            position,
            created_at: now,
            updated_at: now,
        };
        let created = self.repos.faqs.create(&faq).await.map_err(storage)?;
        info!(faq_id = %created.id, "FAQ entry created");
        Ok(created)
    }

    /// `None` when the entry does not exist; an absent position keeps the old one
    pub async fn update_faq(&self, id: Uuid, draft: FaqDraft) -> Result<Option<Faq>, VenueError> {
        validate_faq(&draft)?;
        let existing = self.repos.faqs.list().await.map_err(storage)?;
        let Some(current) = existing.into_iter().find(|f| f.id == id) else {
            info!(faq_id = %id, "Update for unknown FAQ entry ignored");
            return Ok(None);
        };
        let faq = Faq {
            question: draft.question.trim().to_string(),
            answer: draft.answer.trim().to_string(),
            position: draft.position.unwrap_or(current.position),
            updated_at: now(),
            ..current
        };
        let updated = self.repos.faqs.update(&faq).await.map_err(storage)?;
        info!(faq_id = %id, "FAQ entry updated");
        Ok(updated)
    }

    pub async fn delete_faq(&self, id: Uuid) -> Result<bool, VenueError> {
        let removed = self.repos.faqs.delete(id).await.map_err(storage)?;
        info!(faq_id = %id, removed, "FAQ entry deleted");
        Ok(removed)
    }

    // ===== Testimonials =====

    /// Published testimonials only unless `include_unpublished`
    pub async fn list_testimonials(
        &self,
        include_unpublished: bool,
    ) -> Result<Vec<Testimonial>, VenueError> {
        self.repos
            .testimonials
            .list(!include_unpublished)
            .await
            .map_err(storage)
    }

    pub async fn create_testimonial(
        &self,
        draft: TestimonialDraft,
    ) -> Result<Testimonial, VenueError> {
        validate_testimonial(&draft)?;
        let existing = self.repos.testimonials.list(false).await.map_err(storage)?;
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            author: draft.author.trim().to_string(),
            role: optional_text(&draft.role),
            quote: draft.quote.trim().to_string(),
            rating: draft.rating,
            position: next_position(existing.iter().map(|t| t.position)),
            published: draft.published,
            created_at: now(),
        };
        let created = self
            .repos
            .testimonials
            .create(&testimonial)
            .await
            .map_err(storage)?;
        info!(testimonial_id = %created.id, published = created.published, "Testimonial created");
        Ok(created)
    }

    pub async fn delete_testimonial(&self, id: Uuid) -> Result<bool, VenueError> {
        let removed = self.repos.testimonials.delete(id).await.map_err(storage)?;
        info!(testimonial_id = %id, removed, "Testimonial deleted");
        Ok(removed)
    }

    // ===== Service details =====

    pub async fn service_detail(&self, name: &str) -> Result<ServiceDetail, VenueError> {
        let name = name.trim();
        self.repos
            .service_details
            .find_by_name(name)
            .await
            .map_err(storage)?
            .ok_or_else(|| VenueError::not_found("service detail", name))
    }

    pub async fn list_service_details(&self) -> Result<Vec<ServiceDetail>, VenueError> {
        self.repos.service_details.list().await.map_err(storage)
    }

    /// Create or replace the detail page named in the draft
    pub async fn upsert_service_detail(
        &self,
        draft: ServiceDetailDraft,
    ) -> Result<ServiceDetail, VenueError> {
        validate_service_detail(&draft)?;
        let name = draft.name.trim().to_string();
        let existing = self
            .repos
            .service_details
            .find_by_name(&name)
            .await
            .map_err(storage)?;

        let detail = ServiceDetail {
            id: existing.map_or_else(Uuid::new_v4, |d| d.id),
            name,
            description: draft.description.trim().to_string(),
            images: draft
                .images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            updated_at: now(),
        };
        let saved = self
            .repos
            .service_details
            .upsert(&detail)
            .await
            .map_err(storage)?;
        info!(service = %saved.name, images = saved.images.len(), "Service detail saved");
        Ok(saved)
    }
}

fn event_from_draft(id: Uuid, draft: EventDraft, now: chrono::DateTime<chrono::Utc>) -> Event {
    Event {
        id,
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        date: draft.date,
        time: optional_text(&draft.time),
        image_url: optional_text(&draft.image_url),
        category: optional_text(&draft.category),
        featured: draft.featured,
        created_at: now,
        updated_at: now,
    }
}
