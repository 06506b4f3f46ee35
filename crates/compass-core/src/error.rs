//! Error types for `compass-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown card type: {0:?}")]
  UnknownCardKind(String),

  #[error("unknown theme mode: {0:?}")]
  UnknownThemeMode(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
