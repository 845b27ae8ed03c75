//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    booking, event, faq, gallery_asset, page, service_detail, site_settings, testimonial,
};
use crate::contract::{
    Booking, BookingStatus, Event, EventType, Faq, GalleryAsset, Page, ServiceDetail,
    SiteSettings, Testimonial,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Booking Conversions =====

impl TryFrom<booking::Model> for Booking {
    type Error = anyhow::Error;

    fn try_from(entity: booking::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            event_date: entity.event_date,
            event_type: entity.event_type.parse::<EventType>().map_err(|e| anyhow!(e))?,
            guest_count: entity.guest_count.and_then(|g| u32::try_from(g).ok()),
            message: entity.message,
            status: entity.status.parse::<BookingStatus>().map_err(|e| anyhow!(e))?,
            idempotency_key: entity.idempotency_key,
            created_at: entity.created_at,
        })
    }
}

impl From<&Booking> for booking::ActiveModel {
    fn from(model: &Booking) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            email: Set(model.email.clone()),
            phone: Set(model.phone.clone()),
            event_date: Set(model.event_date),
            event_type: Set(model.event_type.as_str().to_string()),
            guest_count: Set(model.guest_count.and_then(|g| i32::try_from(g).ok())),
            message: Set(model.message.clone()),
            status: Set(model.status.as_str().to_string()),
            idempotency_key: Set(model.idempotency_key.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Event Conversions =====

impl From<event::Model> for Event {
    fn from(entity: event::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            date: entity.date,
            time: entity.time,
            image_url: entity.image_url,
            category: entity.category,
            featured: entity.featured,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Event> for event::ActiveModel {
    fn from(model: &Event) -> Self {
        Self {
            id: Set(model.id),
            title: Set(model.title.clone()),
            description: Set(model.description.clone()),
            date: Set(model.date),
            time: Set(model.time.clone()),
            image_url: Set(model.image_url.clone()),
            category: Set(model.category.clone()),
            featured: Set(model.featured),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

/// Active model for an update that must not touch `created_at`
pub fn event_update(model: &Event) -> event::ActiveModel {
    event::ActiveModel {
        created_at: NotSet,
        ..model.into()
    }
}

// ===== Gallery Conversions =====

impl From<gallery_asset::Model> for GalleryAsset {
    fn from(entity: gallery_asset::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            alt: entity.alt,
            url: entity.url,
            key: entity.key,
            category: entity.category,
            position: entity.position,
            created_at: entity.created_at,
        }
    }
}

impl From<&GalleryAsset> for gallery_asset::ActiveModel {
    fn from(model: &GalleryAsset) -> Self {
        Self {
            id: Set(model.id),
            title: Set(model.title.clone()),
            alt: Set(model.alt.clone()),
            url: Set(model.url.clone()),
            key: Set(model.key.clone()),
            category: Set(model.category.clone()),
            position: Set(model.position),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Page Conversions =====

impl From<page::Model> for Page {
    fn from(entity: page::Model) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            content: entity.content,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Page> for page::ActiveModel {
    fn from(model: &Page) -> Self {
        Self {
            id: Set(model.id),
            slug: Set(model.slug.clone()),
            content: Set(model.content.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Site Settings Conversions =====

impl From<site_settings::Model> for SiteSettings {
    fn from(entity: site_settings::Model) -> Self {
        Self {
            site_name: entity.site_name,
            tagline: entity.tagline,
            contact_email: entity.contact_email,
            contact_phone: entity.contact_phone,
            address: entity.address,
            map_url: entity.map_url,
            facebook_url: entity.facebook_url,
            instagram_url: entity.instagram_url,
            business_hours: entity.business_hours,
            booking_notification_email: entity.booking_notification_email,
            updated_at: Some(entity.updated_at),
        }
    }
}

impl From<&SiteSettings> for site_settings::ActiveModel {
    fn from(model: &SiteSettings) -> Self {
        Self {
            id: Set(site_settings::SINGLETON_ID),
            site_name: Set(model.site_name.clone()),
            tagline: Set(model.tagline.clone()),
            contact_email: Set(model.contact_email.clone()),
            contact_phone: Set(model.contact_phone.clone()),
            address: Set(model.address.clone()),
            map_url: Set(model.map_url.clone()),
            facebook_url: Set(model.facebook_url.clone()),
            instagram_url: Set(model.instagram_url.clone()),
            business_hours: Set(model.business_hours.clone()),
            booking_notification_email: Set(model.booking_notification_email.clone()),
            updated_at: Set(model.updated_at.unwrap_or_else(chrono::Utc::now)),
        }
    }
}

// ===== FAQ Conversions =====

impl From<faq::Model> for Faq {
    fn from(entity: faq::Model) -> Self {
        Self {
            id: entity.id,
            question: entity.question,
            answer: entity.answer,
            position: entity.position,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Faq> for faq::ActiveModel {
    fn from(model: &Faq) -> Self {
        Self {
            id: Set(model.id),
            question: Set(model.question.clone()),
            answer: Set(model.answer.clone()),
            position: Set(model.position),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

/// Active model for an update that must not touch `created_at`
pub fn faq_update(model: &Faq) -> faq::ActiveModel {
    faq::ActiveModel {
        created_at: NotSet,
        ..model.into()
    }
}

// ===== Testimonial Conversions =====

impl TryFrom<testimonial::Model> for Testimonial {
    type Error = anyhow::Error;

    fn try_from(entity: testimonial::Model) -> Result<Self, Self::Error> {
        let rating = u8::try_from(entity.rating)
            .map_err(|_| anyhow!("testimonial {} has invalid rating {}", entity.id, entity.rating))?;
        Ok(Self {
            id: entity.id,
            author: entity.author,
            role: entity.role,
            quote: entity.quote,
            rating,
            position: entity.position,
            published: entity.published,
            created_at: entity.created_at,
        })
    }
}

impl From<&Testimonial> for testimonial::ActiveModel {
    fn from(model: &Testimonial) -> Self {
        Self {
            id: Set(model.id),
            author: Set(model.author.clone()),
            role: Set(model.role.clone()),
            quote: Set(model.quote.clone()),
            rating: Set(i16::from(model.rating)),
            position: Set(model.position),
            published: Set(model.published),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Service Detail Conversions =====

impl TryFrom<service_detail::Model> for ServiceDetail {
    type Error = anyhow::Error;

    fn try_from(entity: service_detail::Model) -> Result<Self, Self::Error> {
        let images: Vec<String> = serde_json::from_value(entity.images)?;
        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            images,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&ServiceDetail> for service_detail::ActiveModel {
    fn from(model: &ServiceDetail) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            images: Set(serde_json::Value::from(model.images.clone())),
            updated_at: Set(model.updated_at),
        }
    }
}
