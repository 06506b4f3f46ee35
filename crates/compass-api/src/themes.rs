//! Handlers for `/themes` endpoints.
//!
//! | Method   | Path      | Notes                                      |
//! |----------|-----------|--------------------------------------------|
//! | `GET`    | `/themes` | `?tenant=`; saved theme or tagged default  |
//! | `POST`   | `/themes` | Body `{tenant, theme}`; 201 on first save  |
//! | `DELETE` | `/themes` | `?tenant=`; reset to default, idempotent   |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use compass_core::{
  TenantId,
  store::{CardStore, ThemeStore},
  theme::{Theme, ThemeFields, ThemeLookup},
};

use crate::{AppState, Body, TenantQuery, error::ApiError, require_tenant};

// ─── Get ──────────────────────────────────────────────────────────────────────

/// `GET /themes?tenant=<id>` — the saved theme, or the default with
/// `isDefault: true`.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TenantQuery>,
) -> Result<Json<ThemeLookup>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  let lookup = state
    .store
    .get_theme(&tenant)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(lookup))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveThemeBody {
  pub tenant: TenantId,
  pub theme:  ThemeFields,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
  pub theme: Theme,
}

/// `POST /themes` — body: `{"tenant":"biz_x","theme":{…}}`.
/// 201 when the row is created, 200 when an existing row is updated.
pub async fn save<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  Body(body): Body<SaveThemeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let (theme, created) = state
    .store
    .upsert_theme(&body.tenant, body.theme)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let status = if created {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };
  Ok((status, Json(ThemeResponse { theme })))
}

// ─── Reset ────────────────────────────────────────────────────────────────────

/// `DELETE /themes?tenant=<id>` — revert to the default theme. Succeeds
/// whether or not a saved row existed.
pub async fn reset<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  Query(params): Query<TenantQuery>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  state
    .store
    .reset_theme(&tenant)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "success": true })))
}
