//! Handlers for `/cards` endpoints.
//!
//! | Method   | Path             | Notes                                  |
//! |----------|------------------|----------------------------------------|
//! | `GET`    | `/cards`         | `?tenant=` required; open              |
//! | `POST`   | `/cards`         | `?tenant=` required; admin             |
//! | `PATCH`  | `/cards/{id}`    | Partial body; 404 on id/tenant miss    |
//! | `DELETE` | `/cards/{id}`    | 404 on id/tenant miss                  |
//! | `POST`   | `/cards/reorder` | Body `{"cardIds":[…]}`, non-empty ints |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use compass_core::{
  card::{Card, CardId, CardPatch, NewCard},
  store::{CardStore, ThemeStore},
};

use crate::{AppState, Body, PathId, TenantQuery, error::ApiError, require_tenant};

#[derive(Debug, Serialize)]
pub struct CardsResponse {
  pub cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct CardResponse {
  pub card: Card,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /cards?tenant=<id>`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TenantQuery>,
) -> Result<Json<CardsResponse>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  let cards = state
    .store
    .list_cards(&tenant)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CardsResponse { cards }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /cards?tenant=<id>` — body: `{"type":"text","title":…}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  Query(params): Query<TenantQuery>,
  Body(input): Body<NewCard>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  let card = state
    .store
    .create_card(&tenant, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(CardResponse { card })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /cards/{id}?tenant=<id>` — any subset of card fields.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  PathId(id): PathId<CardId>,
  Query(params): Query<TenantQuery>,
  Body(patch): Body<CardPatch>,
) -> Result<Json<CardResponse>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  let card = state
    .store
    .update_card(id, &tenant, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("card {id} not found")))?;
  Ok(Json(CardResponse { card }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /cards/{id}?tenant=<id>`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  PathId(id): PathId<CardId>,
  Query(params): Query<TenantQuery>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  let removed = state
    .store
    .delete_card(id, &tenant)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("card {id} not found")));
  }
  Ok(Json(json!({ "success": true })))
}

// ─── Reorder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
  pub card_ids: Vec<CardId>,
}

/// `POST /cards/reorder?tenant=<id>` — body: `{"cardIds":[3,1,2]}`
///
/// Non-integer elements never reach the store: they fail body
/// deserialization and are rejected 400 with no mutation.
pub async fn reorder<S>(
  State(state): State<AppState<S>>,
  _auth: crate::auth::Authenticated,
  Query(params): Query<TenantQuery>,
  Body(body): Body<ReorderBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  let tenant = require_tenant(params)?;
  if body.card_ids.is_empty() {
    return Err(ApiError::BadRequest(
      "cardIds must be a non-empty array".to_owned(),
    ));
  }

  state
    .store
    .reorder_cards(&tenant, &body.card_ids)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "success": true })))
}
