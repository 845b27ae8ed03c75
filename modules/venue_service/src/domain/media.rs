//! Object storage seam and key/URL conventions for uploaded media.
//!
//! Keys look like `gallery/<category>/<slug>-<timestamp>.<ext>`, or
//! `<folder>/<slug>-<timestamp>.<ext>` when the caller overrides the folder.
//! Public URLs are `<public_base_url>/<key>`.

use crate::contract::VenueError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Default category for uploads that do not name one
pub const DEFAULT_CATEGORY: &str = "general";

/// Binary object store (bucket) used for gallery images
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any existing one under `key`
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> anyhow::Result<()>;

    /// Remove an object; a missing key is not an error
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Derives and parses public URLs of stored objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrls {
    base: String,
}

impl PublicUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base, key.trim_start_matches('/'))
    }

    /// Key of an object we serve; `None` for foreign URLs
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.base)?.strip_prefix('/')?;
        let key = rest.split(['?', '#']).next().unwrap_or_default();
        if key.is_empty() || key.split('/').any(|seg| seg.is_empty() || seg == "..") {
            return None;
        }
        Some(key.to_string())
    }
}

/// Lowercase ASCII slug; diacritics are transliterated (`Nunți` -> `nunti`)
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

/// Whether the declared content type is an image
pub fn is_image(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false)
}

/// File extension from the file name, falling back to the content type
pub fn extension_for(file_name: &str, content_type: &str) -> Option<String> {
    let from_name = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    if from_name.is_some() {
        return from_name;
    }

    let mime = content_type.parse::<mime::Mime>().ok()?;
    let ext = match mime.subtype().as_str() {
        "jpeg" => "jpg".to_string(),
        sub => slugify(sub),
    };
    (!ext.is_empty()).then_some(ext)
}

/// Build the object key for an upload
pub fn object_key(
    file_name: &str,
    content_type: &str,
    category: &str,
    folder: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String, VenueError> {
    let ext = extension_for(file_name, content_type).ok_or_else(|| {
        VenueError::validation(format!(
            "cannot determine a file extension for '{}' ({})",
            file_name, content_type
        ))
    })?;

    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let mut slug = slugify(stem);
    if slug.is_empty() {
        slug = "image".to_string();
    }

    let prefix = folder
        .map(|f| {
            f.split('/')
                .map(slugify)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/")
        })
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let category = slugify(category);
            let category = if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category
            };
            format!("gallery/{}", category)
        });

    Ok(format!(
        "{}/{}-{}.{}",
        prefix,
        slug,
        now.timestamp_millis(),
        ext
    ))
}
