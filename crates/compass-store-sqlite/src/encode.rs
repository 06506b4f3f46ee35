//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Theme token groups are
//! stored as compact JSON. Enums (`kind`, `mode`) are stored as lowercase
//! strings.

use chrono::{DateTime, Utc};
use compass_core::{
  card::{Card, CardKind},
  tenant::TenantId,
  theme::{Theme, ThemeMode},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── CardKind ────────────────────────────────────────────────────────────────

pub fn encode_card_kind(k: CardKind) -> &'static str {
  match k {
    CardKind::Text => "text",
    CardKind::Image => "image",
    CardKind::Video => "video",
  }
}

pub fn decode_card_kind(s: &str) -> Result<CardKind> {
  match s {
    "text" => Ok(CardKind::Text),
    "image" => Ok(CardKind::Image),
    "video" => Ok(CardKind::Video),
    other => Err(compass_core::Error::UnknownCardKind(other.to_owned()).into()),
  }
}

// ─── ThemeMode ───────────────────────────────────────────────────────────────

pub fn encode_theme_mode(m: ThemeMode) -> &'static str {
  match m {
    ThemeMode::Light => "light",
    ThemeMode::Dark => "dark",
    ThemeMode::Auto => "auto",
  }
}

pub fn decode_theme_mode(s: &str) -> Result<ThemeMode> {
  match s {
    "light" => Ok(ThemeMode::Light),
    "dark" => Ok(ThemeMode::Dark),
    "auto" => Ok(ThemeMode::Auto),
    other => Err(compass_core::Error::UnknownThemeMode(other.to_owned()).into()),
  }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `cards` row as read straight out of SQLite, before decoding.
pub struct RawCard {
  pub id:              i64,
  pub tenant_id:       String,
  pub display_order:   i64,
  pub kind:            String,
  pub title:           Option<String>,
  pub content:         Option<String>,
  pub media_url:       Option<String>,
  pub media_mime_type: Option<String>,
  pub created_at:      String,
  pub updated_at:      String,
  pub created_by:      Option<String>,
}

impl RawCard {
  pub fn into_card(self) -> Result<Card> {
    Ok(Card {
      id:              self.id,
      tenant_id:       TenantId::from(self.tenant_id),
      order:           self.display_order,
      kind:            decode_card_kind(&self.kind)?,
      title:           self.title,
      content:         self.content,
      media_url:       self.media_url,
      media_mime_type: self.media_mime_type,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
      created_by:      self.created_by,
    })
  }
}

/// A `themes` row as read straight out of SQLite, before decoding.
pub struct RawTheme {
  pub tenant_id:     String,
  pub name:          String,
  pub colors:        String,
  pub typography:    String,
  pub border_radius: String,
  pub spacing:       String,
  pub mode:          String,
  pub custom_css:    Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawTheme {
  pub fn into_theme(self) -> Result<Theme> {
    Ok(Theme {
      tenant_id:     TenantId::from(self.tenant_id),
      name:          self.name,
      colors:        serde_json::from_str(&self.colors)?,
      typography:    serde_json::from_str(&self.typography)?,
      border_radius: serde_json::from_str(&self.border_radius)?,
      spacing:       serde_json::from_str(&self.spacing)?,
      mode:          decode_theme_mode(&self.mode)?,
      custom_css:    self.custom_css,
      created_at:    Some(decode_dt(&self.created_at)?),
      updated_at:    Some(decode_dt(&self.updated_at)?),
    })
  }
}
