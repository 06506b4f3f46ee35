//! Upload collaborator contract.
//!
//! The blob transport itself (CDN, object store) lives outside this system;
//! what belongs here is the policy applied BEFORE any network call — mime
//! allow-lists, per-class size caps, filename sanitisation — and the
//! [`BlobStore`] trait a transport implements.

use std::future::Future;

use thiserror::Error;

// ─── Policy ──────────────────────────────────────────────────────────────────

pub const IMAGE_MIME_TYPES: &[&str] = &[
  "image/jpeg",
  "image/jpg",
  "image/png",
  "image/gif",
  "image/webp",
  "image/svg+xml",
];

pub const VIDEO_MIME_TYPES: &[&str] =
  &["video/mp4", "video/webm", "video/ogg", "video/quicktime"];

/// Which size cap applies to an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClass {
  Image,
  Video,
}

#[derive(Debug, Error)]
pub enum UploadError {
  #[error("unsupported media type: {0:?}")]
  UnsupportedMediaType(String),

  #[error("file too large: {size} bytes (limit {limit})")]
  TooLarge { size: u64, limit: u64 },
}

/// Size thresholds for accepted uploads.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
  pub max_image_bytes: u64,
  pub max_video_bytes: u64,
}

impl Default for UploadPolicy {
  fn default() -> Self {
    Self {
      max_image_bytes: 10 * 1024 * 1024,
      max_video_bytes: 50 * 1024 * 1024,
    }
  }
}

impl UploadPolicy {
  /// Validate a declared mime type and size against the policy.
  pub fn check(&self, mime_type: &str, size: u64) -> Result<MediaClass, UploadError> {
    let class = if IMAGE_MIME_TYPES.contains(&mime_type) {
      MediaClass::Image
    } else if VIDEO_MIME_TYPES.contains(&mime_type) {
      MediaClass::Video
    } else {
      return Err(UploadError::UnsupportedMediaType(mime_type.to_owned()));
    };

    let limit = match class {
      MediaClass::Image => self.max_image_bytes,
      MediaClass::Video => self.max_video_bytes,
    };
    if size > limit {
      return Err(UploadError::TooLarge { size, limit });
    }

    Ok(class)
  }
}

/// Lowercase a client filename and replace anything outside `[a-z0-9.-]`
/// with `_`, so it is safe to use in a blob key.
pub fn sanitize_file_name(name: &str) -> String {
  name
    .to_lowercase()
    .chars()
    .map(|c| {
      if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-' {
        c
      } else {
        '_'
      }
    })
    .collect()
}

// ─── Transport trait ─────────────────────────────────────────────────────────

/// The public result of a completed upload.
#[derive(Debug, Clone)]
pub struct StoredBlob {
  pub url:       String,
  pub file_name: String,
  pub size:      u64,
  pub mime_type: String,
}

/// A blob transport. Implementations are expected to be remote; callers run
/// [`UploadPolicy::check`] first so rejected files never leave the process.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn put<'a>(
    &'a self,
    file_name: &'a str,
    bytes: &'a [u8],
    mime_type: &'a str,
  ) -> impl Future<Output = Result<StoredBlob, Self::Error>> + Send + 'a;

  /// Remove a previously uploaded blob by public URL. `false` if unknown.
  fn delete<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_images_and_videos_within_caps() {
    let policy = UploadPolicy::default();
    assert_eq!(policy.check("image/png", 1024).unwrap(), MediaClass::Image);
    assert_eq!(
      policy.check("video/mp4", 20 * 1024 * 1024).unwrap(),
      MediaClass::Video
    );
  }

  #[test]
  fn rejects_unknown_mime_types() {
    let policy = UploadPolicy::default();
    assert!(matches!(
      policy.check("application/pdf", 10),
      Err(UploadError::UnsupportedMediaType(_))
    ));
  }

  #[test]
  fn image_cap_is_stricter_than_video_cap() {
    let policy = UploadPolicy::default();
    let twenty_mib = 20 * 1024 * 1024;
    assert!(matches!(
      policy.check("image/png", twenty_mib),
      Err(UploadError::TooLarge { .. })
    ));
    assert!(policy.check("video/webm", twenty_mib).is_ok());
  }

  #[test]
  fn filename_sanitisation() {
    assert_eq!(
      sanitize_file_name("My Holiday Pic (1).PNG"),
      "my_holiday_pic__1_.png"
    );
    assert_eq!(sanitize_file_name("intro-v2.mp4"), "intro-v2.mp4");
  }
}
