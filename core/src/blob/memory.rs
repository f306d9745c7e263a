// catalog/src/blob/memory.rs

use super::{BlobHandle, BlobStore};
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Keeps track of uploaded objects without reading any file contents.
///
/// URLs take the shape `{base_url}/{object_name}`. Uploading the same object
/// name twice overwrites the earlier entry, as a bucket would.
#[derive(Debug)]
pub struct InMemoryBlobStore {
  base_url: String,
  objects: Mutex<BTreeMap<String, PathBuf>>,
}

impl InMemoryBlobStore {
  pub const DEFAULT_BASE_URL: &'static str = "memory://blobs";

  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      objects: Mutex::new(BTreeMap::new()),
    }
  }

  pub fn contains(&self, object_name: &str) -> bool {
    self.objects.lock().contains_key(object_name)
  }

  pub fn object_count(&self) -> usize {
    self.objects.lock().len()
  }

  /// Local path an object was uploaded from.
  pub fn source_of(&self, object_name: &str) -> Option<PathBuf> {
    self.objects.lock().get(object_name).cloned()
  }
}

impl Default for InMemoryBlobStore {
  fn default() -> Self {
    Self::new(Self::DEFAULT_BASE_URL)
  }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
  async fn upload(&self, object_name: &str, local_path: &Path) -> anyhow::Result<BlobHandle> {
    if object_name.is_empty() {
      return Err(anyhow!("object name must not be empty"));
    }
    self.objects.lock().insert(object_name.to_string(), local_path.to_path_buf());
    event!(Level::TRACE, object_name, source = %local_path.display(), "In-memory upload.");
    Ok(BlobHandle::new(object_name))
  }

  async fn download_url(&self, handle: &BlobHandle) -> anyhow::Result<String> {
    if !self.contains(handle.full_path()) {
      return Err(anyhow!("object '{}' does not exist", handle));
    }
    Ok(format!("{}/{}", self.base_url, handle.full_path()))
  }

  fn resolve_url(&self, url: &str) -> anyhow::Result<BlobHandle> {
    url
      .strip_prefix(&self.base_url)
      .and_then(|rest| rest.strip_prefix('/'))
      .filter(|path| !path.is_empty())
      .map(BlobHandle::new)
      .ok_or_else(|| anyhow!("'{}' is not a URL served by this blob store", url))
  }

  async fn delete(&self, handle: &BlobHandle) -> anyhow::Result<()> {
    match self.objects.lock().remove(handle.full_path()) {
      Some(_) => Ok(()),
      None => Err(anyhow!("object '{}' does not exist", handle)),
    }
  }
}
