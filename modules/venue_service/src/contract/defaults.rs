//! Built-in content served while the singleton documents are absent.
//!
//! The public sections render these until an administrator saves the
//! real documents.

use super::model::SiteSettings;
use serde_json::{json, Value};

/// Slug of the home page document
pub const HOME_PAGE_SLUG: &str = "home";

/// Home page content used until the first save
pub fn home_page_content() -> Value {
    json!({
        "hero": {
            "title": "Your event, our venue",
            "subtitle": "Parties, weddings and corporate events in one place",
            "ctaLabel": "Book now",
            "backgroundImage": null
        },
        "about": {
            "title": "About us",
            "body": "A versatile venue with full event services."
        },
        "services": [
            { "name": "Corporate events", "summary": "Conferences, team building, launches." },
            { "name": "Private parties", "summary": "Birthdays, anniversaries, celebrations." },
            { "name": "Weddings", "summary": "Ceremony and reception under one roof." }
        ],
        "contact": {
            "title": "Contact",
            "body": "Send us the booking form and we will get back to you."
        }
    })
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Event Venue".to_string(),
            tagline: None,
            contact_email: "contact@example.com".to_string(),
            contact_phone: "".to_string(),
            address: None,
            map_url: None,
            facebook_url: None,
            instagram_url: None,
            business_hours: None,
            booking_notification_email: None,
            updated_at: None,
        }
    }
}
