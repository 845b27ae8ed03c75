//! Singleton documents: the home page and the site settings.

use super::{now, storage, Service};
use crate::contract::defaults::{home_page_content, HOME_PAGE_SLUG};
use crate::contract::{Page, PageWrite, SiteSettings, VenueError};
use crate::domain::repository::is_write_conflict;
use crate::domain::validation::{is_valid_email, optional_text};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Why one page save attempt did not go through
enum SaveAttempt {
    /// Lost a race against another writer; safe to retry
    Raced(anyhow::Error),
    Failed(VenueError),
}

impl Service {
    /// The home page, or the built-in default when none was saved yet.
    ///
    /// The default carries a nil id and the Unix epoch as `updated_at`.
    pub async fn home_page(&self) -> Result<Page, VenueError> {
        let stored = self
            .repos
            .pages
            .find_by_slug(HOME_PAGE_SLUG)
            .await
            .map_err(storage)?;
        Ok(stored.unwrap_or_else(|| Page {
            id: Uuid::nil(),
            slug: HOME_PAGE_SLUG.to_string(),
            content: home_page_content(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }))
    }

    /// Save the home page with an optimistic-concurrency check.
    ///
    /// A write whose `last_updated_at` is older than the stored document is
    /// rejected with `Conflict` and changes nothing. Writes that lose a race
    /// inside the store are retried a bounded number of times, re-running
    /// the stale check each time.
    pub async fn save_home_page(&self, write: PageWrite) -> Result<Page, VenueError> {
        if !write.content.is_object() {
            return Err(VenueError::validation("page content must be a JSON object"));
        }

        let attempts = self.options.page_save_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.try_save_page(&write).await {
                Ok(page) => {
                    info!(slug = %page.slug, updated_at = %page.updated_at, attempt, "Page saved");
                    return Ok(page);
                }
                Err(SaveAttempt::Failed(e)) => return Err(e),
                Err(SaveAttempt::Raced(e)) if attempt < attempts => {
                    let delay = backoff_delay(self.options.page_save_backoff, attempt);
                    warn!(attempt, ?delay, error = %e, "Page save raced another writer, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(SaveAttempt::Raced(e)) => {
                    warn!(attempts, error = %e, "Page save gave up after repeated conflicts");
                    return Err(VenueError::conflict(
                        "the page is being edited concurrently, reload and try again",
                    ));
                }
            }
        }
    }

    async fn try_save_page(&self, write: &PageWrite) -> Result<Page, SaveAttempt> {
        let current = self
            .repos
            .pages
            .find_by_slug(HOME_PAGE_SLUG)
            .await
            .map_err(|e| SaveAttempt::Failed(storage(e)))?;
        let now = now();

        let result = match current {
            None => {
                let page = Page {
                    id: Uuid::new_v4(),
                    slug: HOME_PAGE_SLUG.to_string(),
                    content: write.content.clone(),
                    created_at: now,
                    updated_at: now,
                };
                self.repos.pages.insert(&page).await
            }
            Some(current) => {
                if let Some(seen) = write.last_updated_at {
                    if seen < current.updated_at {
                        debug!(%seen, stored = %current.updated_at, "Rejecting stale page write");
                        return Err(SaveAttempt::Failed(VenueError::conflict(format!(
                            "page was modified at {}, after the version being edited",
                            current.updated_at.to_rfc3339()
                        ))));
                    }
                }
                // Strictly increasing, even for two saves within one millisecond
                let updated_at = if now > current.updated_at {
                    now
                } else {
                    current.updated_at + ChronoDuration::milliseconds(1)
                };
                let expected = current.updated_at;
                let page = Page {
                    content: write.content.clone(),
                    updated_at,
                    ..current
                };
                self.repos.pages.update_if_unchanged(&page, expected).await
            }
        };

        result.map_err(|e| {
            if is_write_conflict(&e) {
                SaveAttempt::Raced(e)
            } else {
                SaveAttempt::Failed(storage(e))
            }
        })
    }

    /// Site settings, or the built-in defaults when none were saved yet
    pub async fn site_settings(&self) -> Result<SiteSettings, VenueError> {
        let stored = self.repos.settings.get().await.map_err(storage)?;
        Ok(stored.unwrap_or_else(|| SiteSettings {
            site_name: self.options.site_name.clone(),
            ..SiteSettings::default()
        }))
    }

    /// Replace the site settings
    pub async fn save_site_settings(
        &self,
        settings: SiteSettings,
    ) -> Result<SiteSettings, VenueError> {
        let site_name = settings.site_name.trim().to_string();
        if site_name.is_empty() {
            return Err(VenueError::validation("siteName cannot be empty"));
        }
        let contact_email = settings.contact_email.trim().to_string();
        if !contact_email.is_empty() && !is_valid_email(&contact_email) {
            return Err(VenueError::validation(format!(
                "contactEmail '{}' is not a valid address",
                contact_email
            )));
        }
        let booking_notification_email = optional_text(&settings.booking_notification_email);
        if let Some(email) = &booking_notification_email {
            if !is_valid_email(email) {
                return Err(VenueError::validation(format!(
                    "bookingNotificationEmail '{}' is not a valid address",
                    email
                )));
            }
        }

        let settings = SiteSettings {
            site_name,
            tagline: optional_text(&settings.tagline),
            contact_email,
            contact_phone: settings.contact_phone.trim().to_string(),
            address: optional_text(&settings.address),
            map_url: optional_text(&settings.map_url),
            facebook_url: optional_text(&settings.facebook_url),
            instagram_url: optional_text(&settings.instagram_url),
            business_hours: optional_text(&settings.business_hours),
            booking_notification_email,
            updated_at: Some(now()),
        };

        let saved = self.repos.settings.save(&settings).await.map_err(storage)?;
        info!("Site settings saved");
        Ok(saved)
    }
}

/// Linear backoff plus up to one extra base unit of random jitter
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let jitter = rand::rng().random_range(0..=base_ms);
    Duration::from_millis(base_ms.saturating_mul(u64::from(attempt)).saturating_add(jitter))
}
