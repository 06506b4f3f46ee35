//! Admin authentication.
//!
//! One credential pair guards every mutating route; reads stay open because
//! the end-user surface fetches cards and themes anonymously. A handler
//! opts in by taking the [`Authenticated`] extractor as an argument, so the
//! signature itself shows which operations are admin-only. Anything past
//! "holds the admin credentials" (roles, per-tenant grants) is the host
//! platform's concern and never reaches this server.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use compass_core::store::{CardStore, ThemeStore};

use crate::{AppState, error::ApiError};

/// The admin credential pair the server was configured with.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// Argon2 PHC string (`$argon2id$v=19$…`) — the plaintext password is
  /// never stored.
  pub password_hash: String,
}

impl AuthConfig {
  /// Whether a presented username/password pair matches the configuration.
  ///
  /// Any malformed stored hash counts as a mismatch rather than an error:
  /// a misconfigured server must fail closed.
  pub fn accepts(&self, username: &str, password: &str) -> bool {
    if username != self.username {
      return false;
    }
    let Ok(hash) = PasswordHash::new(&self.password_hash) else {
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &hash)
      .is_ok()
  }
}

/// Decode an `Authorization: Basic …` header into its credential pair.
/// `None` covers every malformed shape — absent header, wrong scheme, bad
/// base64, no `:` separator.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let encoded = value.strip_prefix("Basic ")?;
  let decoded = B64.decode(encoded).ok()?;
  let creds = String::from_utf8(decoded).ok()?;
  let (username, password) = creds.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

/// Zero-size marker proving the request carried valid admin credentials.
pub struct Authenticated;

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: CardStore + ThemeStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (username, password) =
      basic_credentials(&parts.headers).ok_or(ApiError::Unauthorized)?;
    if !state.auth.accepts(&username, &password) {
      return Err(ApiError::Unauthorized);
    }
    Ok(Authenticated)
  }
}
