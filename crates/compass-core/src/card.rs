//! Card types — one ordered unit of onboarding content.
//!
//! Cards are mutable rows, unlike an append-only log: partial updates patch
//! fields in place and deletes are hard deletes. The only derived state is
//! the per-tenant display order, maintained by the store on insert and bulk
//! reorder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::tenant::TenantId;

/// System-assigned integer card identifier.
pub type CardId = i64;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// What a card displays. Video cards reference either an uploaded file
/// (`media_url`) or a pasted provider URL (`content`).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardKind {
  Text,
  Image,
  Video,
}

// ─── Card ────────────────────────────────────────────────────────────────────

/// A persisted onboarding card.
///
/// `order` defines display position among the owning tenant's cards. Values
/// are not required to be unique or contiguous; only ascending sort order is
/// meaningful. Never compare order values numerically in derived logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id:              CardId,
  pub tenant_id:       TenantId,
  pub order:           i64,
  #[serde(rename = "type")]
  pub kind:            CardKind,
  pub title:           Option<String>,
  pub content:         Option<String>,
  pub media_url:       Option<String>,
  pub media_mime_type: Option<String>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
  /// Advisory only — not referentially enforced.
  pub created_by:      Option<String>,
}

// ─── New card ────────────────────────────────────────────────────────────────

/// Caller-supplied fields for card creation. The store assigns id, display
/// order, and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
  #[serde(rename = "type")]
  pub kind:            CardKind,
  #[serde(default)]
  pub title:           Option<String>,
  #[serde(default)]
  pub content:         Option<String>,
  #[serde(default)]
  pub media_url:       Option<String>,
  #[serde(default)]
  pub media_mime_type: Option<String>,
  #[serde(default)]
  pub created_by:      Option<String>,
}

impl NewCard {
  /// A new card of `kind` with every optional field unset.
  pub fn new(kind: CardKind) -> Self {
    Self {
      kind,
      title: None,
      content: None,
      media_url: None,
      media_mime_type: None,
      created_by: None,
    }
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn with_content(mut self, content: impl Into<String>) -> Self {
    self.content = Some(content.into());
    self
  }

  pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
    self.media_url = Some(url.into());
    self
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial card update.
///
/// Each nullable field is a double `Option` so the wire format can express
/// three states: omitted (outer `None`, field untouched), explicit `null`
/// (`Some(None)`, field cleared), and a value (`Some(Some(v))`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:            Option<CardKind>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub title:           Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub content:         Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub media_url:       Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub media_mime_type: Option<Option<String>>,
}

impl CardPatch {
  /// True when no field is provided at all.
  pub fn is_empty(&self) -> bool {
    self.kind.is_none()
      && self.title.is_none()
      && self.content.is_none()
      && self.media_url.is_none()
      && self.media_mime_type.is_none()
  }

  pub fn set_title(mut self, title: Option<String>) -> Self {
    self.title = Some(title);
    self
  }

  pub fn set_content(mut self, content: Option<String>) -> Self {
    self.content = Some(content);
    self
  }

  pub fn set_media_url(mut self, url: Option<String>) -> Self {
    self.media_url = Some(url);
    self
  }
}

/// Deserialize a present field into `Some(inner)`, so JSON `null` becomes
/// `Some(None)` instead of collapsing into the outer `None`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Deserialize::deserialize(de).map(Some)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_distinguishes_null_from_omitted() {
    let patch: CardPatch =
      serde_json::from_str(r#"{"title": null, "content": "hello"}"#).unwrap();

    assert_eq!(patch.title, Some(None));
    assert_eq!(patch.content, Some(Some("hello".to_owned())));
    assert_eq!(patch.media_url, None);
    assert_eq!(patch.kind, None);
  }

  #[test]
  fn empty_patch() {
    let patch: CardPatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn patch_can_change_kind() {
    let patch: CardPatch = serde_json::from_str(r#"{"type": "video"}"#).unwrap();
    assert_eq!(patch.kind, Some(CardKind::Video));
    assert!(!patch.is_empty());
  }

  #[test]
  fn patch_rejects_unknown_kind() {
    let result = serde_json::from_str::<CardPatch>(r#"{"type": "audio"}"#);
    assert!(result.is_err());
  }

  #[test]
  fn patch_serializes_only_present_fields() {
    let patch = CardPatch::default().set_title(None);
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({ "title": null }));
  }

  #[test]
  fn card_wire_format_is_camel_case() {
    let new_card: NewCard = serde_json::from_str(
      r#"{"type": "image", "mediaUrl": "https://cdn.example.com/a.png"}"#,
    )
    .unwrap();
    assert_eq!(new_card.kind, CardKind::Image);
    assert_eq!(
      new_card.media_url.as_deref(),
      Some("https://cdn.example.com/a.png")
    );
  }
}
