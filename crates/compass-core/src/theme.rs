//! Theme types — per-tenant visual token groups.
//!
//! A tenant has at most one saved theme. Absence of a row is a first-class
//! state meaning "use the built-in default"; [`ThemeLookup::is_default`]
//! tells callers which case they got.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

// ─── Mode ────────────────────────────────────────────────────────────────────

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
pub enum ThemeMode {
  Light,
  Dark,
  Auto,
}

// ─── Token groups ────────────────────────────────────────────────────────────

/// Semantic colour roles applied via CSS variables on the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
  // Brand
  pub primary:       String,
  pub primary_hover: String,
  pub secondary:     String,
  pub accent:        String,
  // Backgrounds
  pub background:    String,
  pub surface:       String,
  pub elevated:      String,
  // Text
  pub foreground:    String,
  pub muted:         String,
  pub subtle:        String,
  // Borders
  pub border:        String,
  pub border_focus:  String,
  // States
  pub success:       String,
  pub warning:       String,
  pub error:         String,
  pub info:          String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamily {
  pub heading: String,
  pub body:    String,
  pub mono:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
  pub xs:   String,
  pub sm:   String,
  pub base: String,
  pub lg:   String,
  pub xl:   String,
  #[serde(rename = "2xl")]
  pub xl2:  String,
  #[serde(rename = "3xl")]
  pub xl3:  String,
  #[serde(rename = "4xl")]
  pub xl4:  String,
  #[serde(rename = "5xl")]
  pub xl5:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeights {
  pub light:     u16,
  pub normal:    u16,
  pub medium:    u16,
  pub semibold:  u16,
  pub bold:      u16,
  pub extrabold: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineHeights {
  pub tight:   String,
  pub normal:  String,
  pub relaxed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTypography {
  pub font_family: FontFamily,
  pub font_size:   FontSizes,
  pub font_weight: FontWeights,
  pub line_height: LineHeights,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeBorderRadius {
  pub sm:   String,
  pub md:   String,
  pub lg:   String,
  pub xl:   String,
  #[serde(rename = "2xl")]
  pub xl2:  String,
  pub full: String,
}

/// Spacing is a single multiplier over the rendering side's base scale
/// (1 = default, 1.5 = generous, 0.75 = compact).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeSpacing {
  pub scale: f64,
}

// ─── Theme ───────────────────────────────────────────────────────────────────

/// A tenant's saved theme, or the default preset stamped with the tenant id.
///
/// The built-in default carries no timestamps; saved rows always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
  pub tenant_id:     TenantId,
  pub name:          String,
  pub colors:        ThemeColors,
  pub typography:    ThemeTypography,
  pub border_radius: ThemeBorderRadius,
  pub spacing:       ThemeSpacing,
  pub mode:          ThemeMode,
  #[serde(rename = "customCSS", default, skip_serializing_if = "Option::is_none")]
  pub custom_css:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at:    Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at:    Option<DateTime<Utc>>,
}

impl Theme {
  /// The system default theme for a tenant that never customised one.
  pub fn default_for(tenant_id: TenantId) -> Self {
    ThemeFields::dark_preset().into_theme(tenant_id)
  }
}

/// Result of a theme lookup: the theme plus whether it is the built-in
/// default (never customised) or an explicitly saved row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeLookup {
  pub theme:      Theme,
  pub is_default: bool,
}

// ─── Input fields ────────────────────────────────────────────────────────────

/// Caller-supplied fields for a theme upsert. The store owns the tenant
/// binding and the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFields {
  pub name:          String,
  pub colors:        ThemeColors,
  pub typography:    ThemeTypography,
  pub border_radius: ThemeBorderRadius,
  pub spacing:       ThemeSpacing,
  pub mode:          ThemeMode,
  #[serde(rename = "customCSS", default, skip_serializing_if = "Option::is_none")]
  pub custom_css:    Option<String>,
}

impl ThemeFields {
  fn into_theme(self, tenant_id: TenantId) -> Theme {
    Theme {
      tenant_id,
      name: self.name,
      colors: self.colors,
      typography: self.typography,
      border_radius: self.border_radius,
      spacing: self.spacing,
      mode: self.mode,
      custom_css: self.custom_css,
      created_at: None,
      updated_at: None,
    }
  }

  /// The built-in dark preset — the system-wide default.
  pub fn dark_preset() -> Self {
    Self {
      name: "Compass Dark".to_owned(),
      colors: ThemeColors {
        primary:       "#fa4616".to_owned(),
        primary_hover: "#e03d12".to_owned(),
        secondary:     "#262626".to_owned(),
        accent:        "#fa4616".to_owned(),
        background:    "#141212".to_owned(),
        surface:       "#262626".to_owned(),
        elevated:      "#333333".to_owned(),
        foreground:    "#fafafa".to_owned(),
        muted:         "#7f7f7f".to_owned(),
        subtle:        "#9ca3af".to_owned(),
        border:        "#7f7f7f".to_owned(),
        border_focus:  "#fa4616".to_owned(),
        success:       "#10b981".to_owned(),
        warning:       "#f59e0b".to_owned(),
        error:         "#ef4444".to_owned(),
        info:          "#3b82f6".to_owned(),
      },
      typography: default_typography(),
      border_radius: default_border_radius(),
      spacing: ThemeSpacing { scale: 1.0 },
      mode: ThemeMode::Dark,
      custom_css: None,
    }
  }

  /// Light variant — same brand colours over inverted surfaces.
  pub fn light_preset() -> Self {
    Self {
      name: "Compass Light".to_owned(),
      colors: ThemeColors {
        primary:       "#fa4616".to_owned(),
        primary_hover: "#e03d12".to_owned(),
        secondary:     "#f0f0f0".to_owned(),
        accent:        "#fa4616".to_owned(),
        background:    "#fafafa".to_owned(),
        surface:       "#ffffff".to_owned(),
        elevated:      "#f8f8f8".to_owned(),
        foreground:    "#141212".to_owned(),
        muted:         "#7f7f7f".to_owned(),
        subtle:        "#9ca3af".to_owned(),
        border:        "#dfdfdf".to_owned(),
        border_focus:  "#fa4616".to_owned(),
        success:       "#059669".to_owned(),
        warning:       "#d97706".to_owned(),
        error:         "#dc2626".to_owned(),
        info:          "#2563eb".to_owned(),
      },
      typography: default_typography(),
      border_radius: default_border_radius(),
      spacing: ThemeSpacing { scale: 1.0 },
      mode: ThemeMode::Light,
      custom_css: None,
    }
  }
}

fn default_typography() -> ThemeTypography {
  ThemeTypography {
    font_family: FontFamily {
      heading: "Inter, system-ui, sans-serif".to_owned(),
      body:    "Inter, system-ui, sans-serif".to_owned(),
      mono:    "ui-monospace, monospace".to_owned(),
    },
    font_size: FontSizes {
      xs:   "0.75rem".to_owned(),
      sm:   "0.875rem".to_owned(),
      base: "1rem".to_owned(),
      lg:   "1.125rem".to_owned(),
      xl:   "1.25rem".to_owned(),
      xl2:  "1.5rem".to_owned(),
      xl3:  "1.875rem".to_owned(),
      xl4:  "2.25rem".to_owned(),
      xl5:  "3rem".to_owned(),
    },
    font_weight: FontWeights {
      light:     300,
      normal:    400,
      medium:    500,
      semibold:  600,
      bold:      700,
      extrabold: 800,
    },
    line_height: LineHeights {
      tight:   "1.25".to_owned(),
      normal:  "1.5".to_owned(),
      relaxed: "1.75".to_owned(),
    },
  }
}

fn default_border_radius() -> ThemeBorderRadius {
  ThemeBorderRadius {
    sm:   "0.375rem".to_owned(),
    md:   "0.5rem".to_owned(),
    lg:   "0.75rem".to_owned(),
    xl:   "1rem".to_owned(),
    xl2:  "1.5rem".to_owned(),
    full: "9999px".to_owned(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
