//! Booking intake: validate, persist, then notify.

use super::{now, storage, Service};
use crate::contract::{
    Booking, BookingReceipt, BookingStatus, BookingSubmission, SiteSettings, VenueError,
};
use crate::domain::notify::BookingNotice;
use crate::domain::repository::is_write_conflict;
use crate::domain::validation::validate_booking;
use tracing::{info, warn};
use uuid::Uuid;

/// Longest accepted idempotency key
pub const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

/// Largest page of the admin booking listing
pub const MAX_BOOKING_PAGE: u64 = 500;

impl Service {
    /// Accept a public booking request.
    ///
    /// The booking is persisted before anything else happens; notification
    /// runs afterwards and its outcome never changes the result. When an
    /// idempotency key is given and already used, the earlier booking is
    /// returned and nobody is notified again.
    pub async fn submit_booking(
        &self,
        submission: &BookingSubmission,
        idempotency_key: Option<&str>,
    ) -> Result<BookingReceipt, VenueError> {
        let valid = validate_booking(submission)?;

        let key = idempotency_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        if let Some(key) = &key {
            if key.len() > MAX_IDEMPOTENCY_KEY_LEN {
                return Err(VenueError::validation(format!(
                    "idempotency key longer than {} characters",
                    MAX_IDEMPOTENCY_KEY_LEN
                )));
            }
            if let Some(existing) = self.existing_booking(key).await? {
                return Ok(existing);
            }
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            name: valid.name,
            email: valid.email,
            phone: valid.phone,
            event_date: valid.event_date,
            event_type: valid.event_type,
            guest_count: valid.guest_count,
            message: valid.message,
            status: BookingStatus::New,
            idempotency_key: key.clone(),
            created_at: now(),
        };

        let booking = match self.repos.bookings.create(&booking).await {
            Ok(booking) => booking,
            // Same key inserted by a concurrent request
            Err(e) if is_write_conflict(&e) => match &key {
                Some(key) => match self.existing_booking(key).await? {
                    Some(existing) => return Ok(existing),
                    None => return Err(storage(e)),
                },
                None => return Err(storage(e)),
            },
            Err(e) => return Err(storage(e)),
        };

        info!(
            booking_id = %booking.id,
            event_type = %booking.event_type,
            event_date = %booking.event_date,
            "Booking persisted"
        );

        let notice = self.booking_notice(booking.clone()).await;
        self.notifier.booking_created(notice).await;

        Ok(BookingReceipt {
            booking,
            created: true,
        })
    }

    /// Admin listing, newest first
    pub async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<Booking>, VenueError> {
        let limit = limit.unwrap_or(100).clamp(1, MAX_BOOKING_PAGE);
        self.repos
            .bookings
            .list(status, limit, offset.unwrap_or(0))
            .await
            .map_err(storage)
    }

    /// Administrator status change; `None` when the booking does not exist
    pub async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, VenueError> {
        let updated = self
            .repos
            .bookings
            .update_status(id, status)
            .await
            .map_err(storage)?;
        match &updated {
            Some(_) => info!(booking_id = %id, %status, "Booking status changed"),
            None => warn!(booking_id = %id, "Status change for unknown booking ignored"),
        }
        Ok(updated)
    }

    async fn existing_booking(&self, key: &str) -> Result<Option<BookingReceipt>, VenueError> {
        let existing = self
            .repos
            .bookings
            .find_by_idempotency_key(key)
            .await
            .map_err(storage)?;
        Ok(existing.map(|booking| {
            info!(booking_id = %booking.id, "Duplicate booking submission collapsed");
            BookingReceipt {
                booking,
                created: false,
            }
        }))
    }

    async fn booking_notice(&self, booking: Booking) -> BookingNotice {
        let settings = match self.repos.settings.get().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = ?e, "Site settings unavailable, using defaults for notification");
                None
            }
        };

        let (site_name, operator_email) = match settings {
            Some(SiteSettings {
                site_name,
                booking_notification_email,
                ..
            }) => (
                site_name,
                booking_notification_email.or_else(|| self.options.operator_email.clone()),
            ),
            None => (
                self.options.site_name.clone(),
                self.options.operator_email.clone(),
            ),
        };

        BookingNotice {
            booking,
            site_name,
            operator_email,
        }
    }
}
