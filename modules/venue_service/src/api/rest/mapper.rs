//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Booking conversions =====

impl From<BookingRequest> for contract::BookingSubmission {
    fn from(req: BookingRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            event_date: req.event_date,
            event_type: req.event_type,
            guest_count: req.guest_count,
            message: req.message,
        }
    }
}

impl From<contract::Booking> for BookingDto {
    fn from(booking: contract::Booking) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            event_date: booking.event_date,
            event_type: booking.event_type.to_string(),
            guest_count: booking.guest_count,
            message: booking.message,
            status: booking.status.to_string(),
            created_at: booking.created_at,
        }
    }
}

// ===== Event conversions =====

impl From<contract::Event> for EventDto {
    fn from(event: contract::Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            image_url: event.image_url,
            category: event.category,
            featured: event.featured,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<EventRequest> for contract::EventDraft {
    fn from(req: EventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            time: req.time,
            image_url: req.image_url,
            category: req.category,
            featured: req.featured,
        }
    }
}

// ===== Gallery conversions =====

impl From<contract::GalleryAsset> for GalleryAssetDto {
    fn from(asset: contract::GalleryAsset) -> Self {
        Self {
            id: asset.id,
            title: asset.title,
            alt: asset.alt,
            url: asset.url,
            key: asset.key,
            category: asset.category,
            position: asset.position,
            created_at: asset.created_at,
        }
    }
}

impl From<CreateGalleryAssetRequest> for contract::NewGalleryAsset {
    fn from(req: CreateGalleryAssetRequest) -> Self {
        Self {
            title: req.title,
            alt: req.alt,
            url: req.url,
            category: req.category,
        }
    }
}

// ===== Page conversions =====

impl From<contract::Page> for PageDto {
    fn from(page: contract::Page) -> Self {
        let is_default = page.id.is_nil();
        Self {
            id: (!is_default).then_some(page.id),
            slug: page.slug,
            content: page.content,
            created_at: page.created_at,
            updated_at: page.updated_at,
            is_default,
        }
    }
}

impl From<SavePageRequest> for contract::PageWrite {
    fn from(req: SavePageRequest) -> Self {
        Self {
            content: req.content,
            last_updated_at: req.last_updated_at,
        }
    }
}

// ===== Site settings conversions =====

impl From<contract::SiteSettings> for SiteSettingsDto {
    fn from(s: contract::SiteSettings) -> Self {
        Self {
            site_name: s.site_name,
            tagline: s.tagline,
            contact_email: s.contact_email,
            contact_phone: s.contact_phone,
            address: s.address,
            map_url: s.map_url,
            facebook_url: s.facebook_url,
            instagram_url: s.instagram_url,
            business_hours: s.business_hours,
            booking_notification_email: s.booking_notification_email,
            updated_at: s.updated_at,
        }
    }
}

impl From<SiteSettingsDto> for contract::SiteSettings {
    fn from(dto: SiteSettingsDto) -> Self {
        Self {
            site_name: dto.site_name,
            tagline: dto.tagline,
            contact_email: dto.contact_email,
            contact_phone: dto.contact_phone,
            address: dto.address,
            map_url: dto.map_url,
            facebook_url: dto.facebook_url,
            instagram_url: dto.instagram_url,
            business_hours: dto.business_hours,
            booking_notification_email: dto.booking_notification_email,
            updated_at: None,
        }
    }
}

// ===== FAQ conversions =====

impl From<contract::Faq> for FaqDto {
    fn from(faq: contract::Faq) -> Self {
        Self {
            id: faq.id,
            question: faq.question,
            answer: faq.answer,
            position: faq.position,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
        }
    }
}

impl From<FaqRequest> for contract::FaqDraft {
    fn from(req: FaqRequest) -> Self {
        Self {
            question: req.question,
            answer: req.answer,
            position: req.position,
        }
    }
}

// ===== Testimonial conversions =====

impl From<contract::Testimonial> for TestimonialDto {
    fn from(t: contract::Testimonial) -> Self {
        Self {
            id: t.id,
            author: t.author,
            role: t.role,
            quote: t.quote,
            rating: t.rating,
            position: t.position,
            published: t.published,
            created_at: t.created_at,
        }
    }
}

impl From<TestimonialRequest> for contract::TestimonialDraft {
    fn from(req: TestimonialRequest) -> Self {
        Self {
            author: req.author,
            role: req.role,
            quote: req.quote,
            rating: req.rating,
            published: req.published,
        }
    }
}

// ===== Service detail conversions =====

impl From<contract::ServiceDetail> for ServiceDetailDto {
    fn from(d: contract::ServiceDetail) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            images: d.images,
            updated_at: d.updated_at,
        }
    }
}

impl From<ServiceDetailRequest> for contract::ServiceDetailDraft {
    fn from(req: ServiceDetailRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            images: req.images,
        }
    }
}
