//! Venue Service Module
//!
//! Backend for an event venue website: public booking intake with e-mail
//! notification, and the content collections (home page, site settings,
//! events, gallery, FAQ, testimonials, service details) edited from the
//! admin panel.

// Public exports
pub mod contract;
pub use contract::{client::VenueApi, error::VenueError, Booking, BookingStatus, EventType};

pub mod module;
pub use module::VenueServiceModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
