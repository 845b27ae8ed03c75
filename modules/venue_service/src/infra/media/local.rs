//! Filesystem object store
//!
//! Objects live under `root/<key>`. Served publicly by the binary under the
//! configured public base URL.

use crate::domain::ObjectStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create the root directory if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("failed to create media directory '{}'", root.display()))?;

        info!(path = %root.display(), "Local object store initialized");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `key`, refusing anything that would escape the root
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        let mut depth = 0usize;
        for component in Path::new(key).components() {
            match component {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    bail!("object key '{}' escapes the media root", key)
                }
            }
        }
        if depth == 0 {
            bail!("object key is empty");
        }
        Ok(resolved)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
        fs::write(&path, data)
            .await
            .with_context(|| format!("failed to write object '{}'", key))?;

        debug!(%key, size = data.len(), %content_type, "Stored object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%key, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to delete object '{}'", key)),
        }
    }
}
