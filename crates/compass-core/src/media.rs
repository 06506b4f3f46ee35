//! Read-time banner classification.
//!
//! A stored card is resolved once into a [`Banner`] tagged union before
//! rendering, instead of scattering type inference across call sites. Video
//! provider detection is a pure function over the URL: host patterns for the
//! embed providers the carousel supports, file extension for direct uploads.

use url::Url;

use crate::card::{Card, CardKind};

// ─── Types ───────────────────────────────────────────────────────────────────

/// Known embeddable video hosts, plus direct file playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProvider {
  YouTube,
  Vimeo,
  Loom,
  Wistia,
  /// A direct media file (e.g. an uploaded .mp4) played natively.
  File,
  /// Anything else — handed to the renderer as a generic embed.
  Generic,
}

/// What the rendering collaborator should display for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
  Text,
  Image,
  Video(VideoProvider),
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Resolve a card into its displayable banner form.
///
/// Video cards prefer the uploaded `media_url`; a pasted provider URL in
/// `content` is the fallback.
pub fn classify(card: &Card) -> Banner {
  match card.kind {
    CardKind::Text => Banner::Text,
    CardKind::Image => Banner::Image,
    CardKind::Video => {
      let url = card
        .media_url
        .as_deref()
        .or(card.content.as_deref())
        .unwrap_or("");
      Banner::Video(classify_video_url(url))
    }
  }
}

/// Classify a video URL by host, falling back to file-extension matching.
pub fn classify_video_url(raw: &str) -> VideoProvider {
  let Ok(url) = Url::parse(raw) else {
    return VideoProvider::Generic;
  };

  if let Some(host) = url.host_str() {
    let host = host.trim_start_matches("www.");
    if host == "youtu.be" || host_is(host, "youtube.com") {
      return VideoProvider::YouTube;
    }
    if host_is(host, "vimeo.com") {
      return VideoProvider::Vimeo;
    }
    if host_is(host, "loom.com") {
      return VideoProvider::Loom;
    }
    if host_is(host, "wistia.com") || host_is(host, "wistia.net") || host == "wi.st" {
      return VideoProvider::Wistia;
    }
  }

  match url.path().rsplit('.').next() {
    Some("mp4" | "webm" | "ogg" | "ogv" | "mov") => VideoProvider::File,
    _ => VideoProvider::Generic,
  }
}

/// True when `host` is `domain` or a subdomain of it.
fn host_is(host: &str, domain: &str) -> bool {
  host == domain || host.ends_with(&format!(".{domain}"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
