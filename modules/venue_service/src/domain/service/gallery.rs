//! Gallery assets and media uploads.

use super::{next_position, now, storage, Service};
use crate::contract::{GalleryAsset, MediaUpload, NewGalleryAsset, VenueError};
use crate::domain::media::{is_image, object_key, DEFAULT_CATEGORY};
use crate::domain::validation::optional_text;
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

impl Service {
    /// Gallery assets by position, optionally restricted to one category
    pub async fn list_gallery(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<GalleryAsset>, VenueError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        self.repos.gallery.list(category).await.map_err(storage)
    }

    /// Register an asset that is already reachable at `url`
    pub async fn add_gallery_asset(
        &self,
        new: NewGalleryAsset,
    ) -> Result<GalleryAsset, VenueError> {
        let url = new.url.trim().to_string();
        if url.is_empty() {
            return Err(VenueError::validation("gallery asset url cannot be empty"));
        }
        let key = self.options.public_urls.key_from_url(&url);
        self.insert_asset(new.title, new.alt, url, key, new.category)
            .await
    }

    /// Store an uploaded image and register it in the gallery.
    ///
    /// If the record cannot be written the stored object is removed again.
    pub async fn upload_media(&self, upload: MediaUpload) -> Result<GalleryAsset, VenueError> {
        if upload.data.is_empty() {
            return Err(VenueError::validation("uploaded file is empty"));
        }
        if upload.data.len() > self.options.max_upload_bytes {
            return Err(VenueError::validation(format!(
                "uploaded file exceeds {} bytes",
                self.options.max_upload_bytes
            )));
        }
        if !is_image(&upload.content_type) {
            return Err(VenueError::validation(format!(
                "only images can be uploaded, got '{}'",
                upload.content_type
            )));
        }

        let key = object_key(
            &upload.file_name,
            &upload.content_type,
            &upload.category,
            upload.folder.as_deref(),
            now(),
        )?;

        self.object_store
            .put(&key, &upload.data, &upload.content_type)
            .await
            .map_err(|e| {
                tracing::error!(%key, error = ?e, "Object store rejected upload");
                VenueError::Media {
                    message: "failed to store the uploaded file".to_string(),
                }
            })?;
        info!(%key, bytes = upload.data.len(), "Media object stored");

        let url = self.options.public_urls.url_for(&key);
        let title = optional_text(&upload.title).unwrap_or_else(|| {
            upload
                .file_name
                .rsplit_once('.')
                .map_or(upload.file_name.as_str(), |(stem, _)| stem)
                .to_string()
        });

        match self
            .insert_asset(title, upload.alt, url, Some(key.clone()), upload.category)
            .await
        {
            Ok(asset) => Ok(asset),
            Err(e) => {
                if let Err(cleanup) = self.object_store.delete(&key).await {
                    warn!(%key, error = ?cleanup, "Failed to remove orphaned media object");
                }
                Err(e)
            }
        }
    }

    /// Delete an asset. Unknown ids succeed; returns whether a record was removed.
    ///
    /// The backing object is removed afterwards on a best-effort basis.
    pub async fn delete_gallery_asset(&self, id: Uuid) -> Result<bool, VenueError> {
        let Some(asset) = self.repos.gallery.find_by_id(id).await.map_err(storage)? else {
            info!(asset_id = %id, "Gallery asset already absent");
            return Ok(false);
        };

        let removed = self.repos.gallery.delete(id).await.map_err(storage)?;

        if let Some(key) = &asset.key {
            if let Err(e) = self.object_store.delete(key).await {
                warn!(asset_id = %id, %key, error = ?e, "Failed to delete media object");
            }
        }

        info!(asset_id = %id, removed, "Gallery asset deleted");
        Ok(removed)
    }

    /// Set positions so the listing follows `ids`; unknown ids are skipped
    pub async fn reorder_gallery(&self, ids: &[Uuid]) -> Result<(), VenueError> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(VenueError::validation(format!(
                "id {} appears more than once",
                dup
            )));
        }

        let mut positions = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            let position = i32::try_from(index)
                .map_err(|_| VenueError::validation("too many ids to reorder"))?;
            positions.push((*id, position));
        }

        self.repos
            .gallery
            .set_positions(&positions)
            .await
            .map_err(storage)?;
        info!(count = positions.len(), "Gallery reordered");
        Ok(())
    }

    async fn insert_asset(
        &self,
        title: String,
        alt: Option<String>,
        url: String,
        key: Option<String>,
        category: String,
    ) -> Result<GalleryAsset, VenueError> {
        let existing = self.repos.gallery.list(None).await.map_err(storage)?;
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            c => c.to_lowercase(),
        };

        let asset = GalleryAsset {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            alt: optional_text(&alt),
            url,
            key,
            category,
            position: next_position(existing.iter().map(|a| a.position)),
            created_at: now(),
        };

        let created = self.repos.gallery.create(&asset).await.map_err(storage)?;
        info!(asset_id = %created.id, category = %created.category, "Gallery asset created");
        Ok(created)
    }
}
