//! JSON REST layer for the Compass onboarding-card service.
//!
//! Exposes an axum [`Router`] backed by any [`CardStore`] + [`ThemeStore`]
//! backend. Reads are open; writes require HTTP Basic credentials checked
//! against an argon2 hash. The tenant is an explicit `?tenant=` parameter
//! (or body field) on every route — there is no ambient tenant state.

pub mod auth;
pub mod cards;
pub mod error;
pub mod themes;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{FromRequest, FromRequestParts},
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use compass_core::{
  TenantId,
  store::{CardStore, ThemeStore},
};

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `COMPASS_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Extractors ───────────────────────────────────────────────────────────────

/// JSON body extractor whose rejection uses the `{"error": …}` envelope with
/// status 400 instead of axum's default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Body<T>(pub T);

/// Path-parameter extractor with the same envelope treatment, so a
/// non-numeric `/cards/{id}` segment is a 400 in the standard shape rather
/// than axum's plain-text rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathId<T>(pub T);

/// The `?tenant=` query parameter, optional at the extractor level so a
/// missing value produces our envelope rather than a query rejection.
#[derive(Debug, Deserialize)]
pub struct TenantQuery {
  pub tenant: Option<String>,
}

/// Resolve the tenant parameter or fail 400.
pub fn require_tenant(params: TenantQuery) -> Result<TenantId, ApiError> {
  params
    .tenant
    .filter(|t| !t.is_empty())
    .map(TenantId::from)
    .ok_or_else(|| ApiError::BadRequest("tenant is required".to_owned()))
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the card and theme API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/cards", get(cards::list::<S>).post(cards::create::<S>))
    .route("/cards/reorder", post(cards::reorder::<S>))
    .route(
      "/cards/{id}",
      axum::routing::patch(cards::update::<S>).delete(cards::remove::<S>),
    )
    .route(
      "/themes",
      get(themes::get_one::<S>)
        .post(themes::save::<S>)
        .delete(themes::reset::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body as HttpBody,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use compass_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state(password: &str) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    AppState {
      store: Arc::new(store),
      auth:  Arc::new(AuthConfig {
        username:      "admin".to_owned(),
        password_hash: hash,
      }),
    }
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn oneshot_json(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
      builder = builder.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(HttpBody::from(v.to_string()))
        .unwrap(),
      None => builder.body(HttpBody::empty()).unwrap(),
    };

    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  async fn create_card(
    state: &AppState<SqliteStore>,
    auth: &str,
    tenant: &str,
    body: Value,
  ) -> Value {
    let (status, json) = oneshot_json(
      state.clone(),
      "POST",
      &format!("/cards?tenant={tenant}"),
      Some(auth),
      Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["card"].clone()
  }

  // ── Card lifecycle ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn card_lifecycle_end_to_end() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    // Create.
    let card = create_card(
      &state,
      &auth,
      "biz_1",
      json!({"type": "text", "title": "Welcome", "content": "Hi"}),
    )
    .await;
    assert_eq!(card["order"], json!(0));
    let id = card["id"].as_i64().unwrap();

    // Listed in sorted position.
    let (status, listed) =
      oneshot_json(state.clone(), "GET", "/cards?tenant=biz_1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["cards"].as_array().unwrap().len(), 1);
    assert_eq!(listed["cards"][0]["id"].as_i64().unwrap(), id);

    // Patch changes only the title.
    let (status, patched) = oneshot_json(
      state.clone(),
      "PATCH",
      &format!("/cards/{id}?tenant=biz_1"),
      Some(&auth),
      Some(json!({"title": "Welcome!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["card"]["title"], json!("Welcome!"));
    assert_eq!(patched["card"]["content"], json!("Hi"));

    // Delete, then the listing excludes it.
    let (status, _) = oneshot_json(
      state.clone(),
      "DELETE",
      &format!("/cards/{id}?tenant=biz_1"),
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) =
      oneshot_json(state, "GET", "/cards?tenant=biz_1", None, None).await;
    assert!(listed["cards"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn second_card_gets_next_order() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let first =
      create_card(&state, &auth, "biz_1", json!({"type": "text"})).await;
    let second =
      create_card(&state, &auth, "biz_1", json!({"type": "image"})).await;
    assert_eq!(first["order"], json!(0));
    assert_eq!(second["order"], json!(1));
  }

  // ── Validation ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_with_invalid_type_is_400() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let (status, body) = oneshot_json(
      state,
      "POST",
      "/cards?tenant=biz_1",
      Some(&auth),
      Some(json!({"type": "audio"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn non_numeric_card_id_is_400_with_envelope() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let (status, body) = oneshot_json(
      state,
      "PATCH",
      "/cards/abc?tenant=biz_1",
      Some(&auth),
      Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn missing_tenant_is_400_with_envelope() {
    let state = make_state("secret").await;

    let (status, body) =
      oneshot_json(state, "GET", "/cards", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("tenant is required"));
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reads_are_open_writes_require_auth() {
    let state = make_state("secret").await;

    let (status, _) =
      oneshot_json(state.clone(), "GET", "/cards?tenant=biz_1", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/cards?tenant=biz_1",
      None,
      Some(json!({"type": "text"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let wrong = auth_header("admin", "wrong");
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/cards?tenant=biz_1",
      Some(&wrong),
      Some(json!({"type": "text"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn unauthorized_response_carries_basic_challenge() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .method("POST")
      .uri("/cards?tenant=biz_1")
      .header(header::CONTENT_TYPE, "application/json")
      .body(HttpBody::from(json!({"type": "text"}).to_string()))
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  // ── Tenant isolation over HTTP ──────────────────────────────────────────────

  #[tokio::test]
  async fn foreign_tenant_cannot_see_or_mutate_a_card() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let card =
      create_card(&state, &auth, "biz_1", json!({"type": "text"})).await;
    let id = card["id"].as_i64().unwrap();

    let (status, _) = oneshot_json(
      state.clone(),
      "PATCH",
      &format!("/cards/{id}?tenant=biz_2"),
      Some(&auth),
      Some(json!({"title": "stolen"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = oneshot_json(
      state.clone(),
      "DELETE",
      &format!("/cards/{id}?tenant=biz_2"),
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) =
      oneshot_json(state, "GET", "/cards?tenant=biz_2", None, None).await;
    assert!(listed["cards"].as_array().unwrap().is_empty());
  }

  // ── Reorder ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reorder_applies_requested_sequence() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
      let card = create_card(
        &state,
        &auth,
        "biz_1",
        json!({"type": "text", "title": title}),
      )
      .await;
      ids.push(card["id"].as_i64().unwrap());
    }

    let reordered = vec![ids[2], ids[0], ids[1]];
    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/cards/reorder?tenant=biz_1",
      Some(&auth),
      Some(json!({"cardIds": reordered})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (_, listed) =
      oneshot_json(state, "GET", "/cards?tenant=biz_1", None, None).await;
    let listed_ids: Vec<i64> = listed["cards"]
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["id"].as_i64().unwrap())
      .collect();
    assert_eq!(listed_ids, reordered);
  }

  #[tokio::test]
  async fn reorder_rejects_non_numeric_ids_without_mutation() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let a = create_card(&state, &auth, "biz_1", json!({"type": "text"})).await;
    let b = create_card(&state, &auth, "biz_1", json!({"type": "text"})).await;
    let before = vec![a["id"].as_i64().unwrap(), b["id"].as_i64().unwrap()];

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/cards/reorder?tenant=biz_1",
      Some(&auth),
      Some(json!({"cardIds": [before[1], "two"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // No card order changed.
    let (_, listed) =
      oneshot_json(state, "GET", "/cards?tenant=biz_1", None, None).await;
    let after: Vec<i64> = listed["cards"]
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["id"].as_i64().unwrap())
      .collect();
    assert_eq!(after, before);
  }

  #[tokio::test]
  async fn reorder_rejects_empty_list() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    let (status, _) = oneshot_json(
      state,
      "POST",
      "/cards/reorder?tenant=biz_1",
      Some(&auth),
      Some(json!({"cardIds": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Themes ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn theme_defaults_save_and_reset() {
    let state = make_state("secret").await;
    let auth = auth_header("admin", "secret");

    // Never customised → default, tagged.
    let (status, body) =
      oneshot_json(state.clone(), "GET", "/themes?tenant=biz_1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDefault"], json!(true));

    // First save → 201.
    let fields =
      serde_json::to_value(compass_core::theme::ThemeFields::light_preset())
        .unwrap();
    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/themes",
      Some(&auth),
      Some(json!({"tenant": "biz_1", "theme": fields})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["theme"]["mode"], json!("light"));

    // Now the lookup returns the saved row.
    let (_, body) =
      oneshot_json(state.clone(), "GET", "/themes?tenant=biz_1", None, None).await;
    assert_eq!(body["isDefault"], json!(false));

    // Second save → 200.
    let fields =
      serde_json::to_value(compass_core::theme::ThemeFields::dark_preset())
        .unwrap();
    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/themes",
      Some(&auth),
      Some(json!({"tenant": "biz_1", "theme": fields})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Reset (idempotent) → back to the default.
    let (status, _) = oneshot_json(
      state.clone(),
      "DELETE",
      "/themes?tenant=biz_1",
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) =
      oneshot_json(state, "GET", "/themes?tenant=biz_1", None, None).await;
    assert_eq!(body["isDefault"], json!(true));
  }

  #[tokio::test]
  async fn theme_write_requires_auth() {
    let state = make_state("secret").await;
    let fields =
      serde_json::to_value(compass_core::theme::ThemeFields::dark_preset())
        .unwrap();

    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/themes",
      None,
      Some(json!({"tenant": "biz_1", "theme": fields})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
      oneshot_json(state, "DELETE", "/themes?tenant=biz_1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }
}
