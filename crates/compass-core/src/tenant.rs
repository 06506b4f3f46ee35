//! Tenant identity.
//!
//! Every store operation takes the tenant explicitly. The newtype keeps the
//! isolation rule mechanically checkable: there is no ambient "current
//! tenant" anywhere in the system, so a handler cannot forget to scope a
//! query without the missing argument showing up in its signature.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of the company/community that owns a set of cards and
/// at most one theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TenantId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TenantId {
  fn from(s: &str) -> Self {
    Self(s.to_owned())
  }
}

impl From<String> for TenantId {
  fn from(s: String) -> Self {
    Self(s)
  }
}
