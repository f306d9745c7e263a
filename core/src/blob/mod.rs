// catalog/src/blob/mod.rs

//! Defines the `BlobStore` trait for product photos.
//!
//! A blob is addressed two ways: by a `BlobHandle` (its full path inside the
//! bucket) and by the retrievable URL handed to the presentation layer. Only
//! URLs are stored on products, so deletion goes URL -> handle -> delete.

pub mod memory;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Opaque reference to a stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobHandle {
  full_path: String,
}

impl BlobHandle {
  pub fn new(full_path: impl Into<String>) -> Self {
    Self {
      full_path: full_path.into(),
    }
  }

  pub fn full_path(&self) -> &str {
    &self.full_path
  }

  /// The last segment of the path.
  pub fn name(&self) -> &str {
    self.full_path.rsplit('/').next().unwrap_or(&self.full_path)
  }
}

impl fmt::Display for BlobHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.full_path)
  }
}

#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
  /// Uploads the file at `local_path` under `object_name`.
  async fn upload(&self, object_name: &str, local_path: &Path) -> anyhow::Result<BlobHandle>;

  /// A URL the presentation layer can fetch the blob from.
  async fn download_url(&self, handle: &BlobHandle) -> anyhow::Result<String>;

  /// Maps a URL previously returned by `download_url` back to its handle.
  fn resolve_url(&self, url: &str) -> anyhow::Result<BlobHandle>;

  async fn delete(&self, handle: &BlobHandle) -> anyhow::Result<()>;
}

/// Storage object name for a local file: everything after the last `/`.
///
/// Returns an empty string for an empty path or a path ending in `/`.
pub fn object_name_from_path(local_path: &str) -> &str {
  match local_path.rfind('/') {
    Some(idx) => &local_path[idx + 1..],
    None => local_path,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn object_name_is_trailing_segment() {
    assert_eq!(object_name_from_path("/tmp/photo.jpg"), "photo.jpg");
    assert_eq!(object_name_from_path("photo.jpg"), "photo.jpg");
    assert_eq!(object_name_from_path("file:///data/user/0/cache/IMG_01.png"), "IMG_01.png");
    assert_eq!(object_name_from_path("/tmp/"), "");
    assert_eq!(object_name_from_path(""), "");
  }

  #[test]
  fn handle_name_is_last_path_segment() {
    assert_eq!(BlobHandle::new("photos/pen.jpg").name(), "pen.jpg");
    assert_eq!(BlobHandle::new("pen.jpg").name(), "pen.jpg");
  }
}
