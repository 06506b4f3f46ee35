//! The `CardStore` and `ThemeStore` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `compass-store-sqlite`). Higher layers (`compass-api`, `compass-admin`)
//! depend on these abstractions, not on any concrete backend.
//!
//! Every operation takes the owning [`TenantId`] explicitly. A backend MUST
//! filter every id-addressed read and write by both id and tenant, so a
//! caller can never observe or mutate another tenant's row.

use std::future::Future;

use crate::{
  card::{Card, CardId, CardPatch, NewCard},
  tenant::TenantId,
  theme::{Theme, ThemeFields, ThemeLookup},
};

// ─── Cards ───────────────────────────────────────────────────────────────────

/// Abstraction over the ordered, tenant-scoped card collection.
///
/// Not-found is signalled by `None`/`false`, never by an error; errors are
/// reserved for backend failures.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All cards for the tenant, ascending by display order. An empty tenant
  /// yields an empty vec.
  fn list_cards<'a>(
    &'a self,
    tenant: &'a TenantId,
  ) -> impl Future<Output = Result<Vec<Card>, Self::Error>> + Send + 'a;

  /// A single card, filtered by id AND tenant. `None` when the id does not
  /// exist under this tenant — even if it exists under another.
  fn get_card<'a>(
    &'a self,
    id: CardId,
    tenant: &'a TenantId,
  ) -> impl Future<Output = Result<Option<Card>, Self::Error>> + Send + 'a;

  /// Persist a new card. Display order is assigned as the tenant's current
  /// maximum + 1 (an empty tenant counts as maximum -1, so the first card
  /// gets order 0). Never computed globally.
  fn create_card<'a>(
    &'a self,
    tenant: &'a TenantId,
    input: NewCard,
  ) -> impl Future<Output = Result<Card, Self::Error>> + Send + 'a;

  /// Apply a partial update and refresh `updated_at`. Fields omitted from
  /// the patch are untouched; fields explicitly set to `null` are cleared.
  /// `None` when no row matches id + tenant.
  fn update_card<'a>(
    &'a self,
    id: CardId,
    tenant: &'a TenantId,
    patch: CardPatch,
  ) -> impl Future<Output = Result<Option<Card>, Self::Error>> + Send + 'a;

  /// Hard-delete a card. `false` when no row matched — not an error.
  /// Remaining orders are left as-is (no compaction).
  fn delete_card<'a>(
    &'a self,
    id: CardId,
    tenant: &'a TenantId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Bulk order reassignment: each listed id found under the tenant gets
  /// `order = index`. Ids belonging to other tenants (or to nothing) are
  /// silently skipped. The whole reassignment is atomic — a failure leaves
  /// every order untouched.
  fn reorder_cards<'a>(
    &'a self,
    tenant: &'a TenantId,
    ids: &'a [CardId],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Themes ──────────────────────────────────────────────────────────────────

/// Abstraction over the at-most-one-theme-per-tenant table.
pub trait ThemeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The tenant's saved theme, or the built-in default tagged
  /// `is_default = true` when no row exists.
  fn get_theme<'a>(
    &'a self,
    tenant: &'a TenantId,
  ) -> impl Future<Output = Result<ThemeLookup, Self::Error>> + Send + 'a;

  /// Insert or update the tenant's theme. An update preserves `created_at`.
  /// The returned flag is `true` when a new row was created.
  fn upsert_theme<'a>(
    &'a self,
    tenant: &'a TenantId,
    fields: ThemeFields,
  ) -> impl Future<Output = Result<(Theme, bool), Self::Error>> + Send + 'a;

  /// Delete the tenant's theme row if present, reverting lookups to the
  /// default. Idempotent; the flag reports whether a row was removed.
  fn reset_theme<'a>(
    &'a self,
    tenant: &'a TenantId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
