//! [`SqliteStore`] — the SQLite implementation of [`CardStore`] and
//! [`ThemeStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use compass_core::{
  card::{Card, CardId, CardPatch, NewCard},
  store::{CardStore, ThemeStore},
  tenant::TenantId,
  theme::{Theme, ThemeFields, ThemeLookup},
};

use crate::{
  Error, Result,
  encode::{
    RawCard, RawTheme, decode_dt, encode_card_kind, encode_dt,
    encode_theme_mode,
  },
  schema::SCHEMA,
};

const CARD_COLUMNS: &str = "id, tenant_id, display_order, kind, title, \
                            content, media_url, media_mime_type, created_at, \
                            updated_at, created_by";

fn raw_card_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCard> {
  Ok(RawCard {
    id:              row.get(0)?,
    tenant_id:       row.get(1)?,
    display_order:   row.get(2)?,
    kind:            row.get(3)?,
    title:           row.get(4)?,
    content:         row.get(5)?,
    media_url:       row.get(6)?,
    media_mime_type: row.get(7)?,
    created_at:      row.get(8)?,
    updated_at:      row.get(9)?,
    created_by:      row.get(10)?,
  })
}

fn opt_text(v: Option<String>) -> Value {
  v.map(Value::Text).unwrap_or(Value::Null)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Compass store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CardStore impl ──────────────────────────────────────────────────────────

impl CardStore for SqliteStore {
  type Error = Error;

  async fn list_cards(&self, tenant: &TenantId) -> Result<Vec<Card>> {
    let tenant_str = tenant.as_str().to_owned();

    let raws: Vec<RawCard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CARD_COLUMNS} FROM cards
           WHERE tenant_id = ?1
           ORDER BY display_order ASC, id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![tenant_str], raw_card_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCard::into_card).collect()
  }

  async fn get_card(&self, id: CardId, tenant: &TenantId) -> Result<Option<Card>> {
    let tenant_str = tenant.as_str().to_owned();

    let raw: Option<RawCard> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CARD_COLUMNS} FROM cards
                 WHERE id = ?1 AND tenant_id = ?2"
              ),
              rusqlite::params![id, tenant_str],
              raw_card_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCard::into_card).transpose()
  }

  async fn create_card(&self, tenant: &TenantId, input: NewCard) -> Result<Card> {
    let now_str = encode_dt(Utc::now());
    let tenant_str = tenant.as_str().to_owned();
    let kind_str = encode_card_kind(input.kind).to_owned();
    let NewCard {
      title,
      content,
      media_url,
      media_mime_type,
      created_by,
      ..
    } = input;

    let raw: RawCard = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Per-tenant max; MAX() over an empty set yields NULL, which maps to
        // -1 so the first card gets order 0.
        let max: Option<i64> = tx.query_row(
          "SELECT MAX(display_order) FROM cards WHERE tenant_id = ?1",
          rusqlite::params![tenant_str],
          |row| row.get(0),
        )?;
        let order = max.unwrap_or(-1) + 1;

        tx.execute(
          "INSERT INTO cards (
             tenant_id, display_order, kind, title, content,
             media_url, media_mime_type, created_at, updated_at, created_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            tenant_str,
            order,
            kind_str,
            title,
            content,
            media_url,
            media_mime_type,
            now_str,
            now_str,
            created_by,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(RawCard {
          id,
          tenant_id: tenant_str,
          display_order: order,
          kind: kind_str,
          title,
          content,
          media_url,
          media_mime_type,
          created_at: now_str.clone(),
          updated_at: now_str,
          created_by,
        })
      })
      .await?;

    raw.into_card()
  }

  async fn update_card(
    &self,
    id: CardId,
    tenant: &TenantId,
    patch: CardPatch,
  ) -> Result<Option<Card>> {
    let tenant_str = tenant.as_str().to_owned();
    let now_str = encode_dt(Utc::now());

    // Build the SET clause from the fields the patch actually carries;
    // Some(None) clears a column, outer None leaves it alone.
    let mut sets: Vec<&'static str> = vec!["updated_at = ?"];
    let mut vals: Vec<Value> = vec![Value::Text(now_str)];

    if let Some(kind) = patch.kind {
      sets.push("kind = ?");
      vals.push(Value::Text(encode_card_kind(kind).to_owned()));
    }
    if let Some(title) = patch.title {
      sets.push("title = ?");
      vals.push(opt_text(title));
    }
    if let Some(content) = patch.content {
      sets.push("content = ?");
      vals.push(opt_text(content));
    }
    if let Some(media_url) = patch.media_url {
      sets.push("media_url = ?");
      vals.push(opt_text(media_url));
    }
    if let Some(media_mime_type) = patch.media_mime_type {
      sets.push("media_mime_type = ?");
      vals.push(opt_text(media_mime_type));
    }

    vals.push(Value::Integer(id));
    vals.push(Value::Text(tenant_str));

    let raw: Option<RawCard> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let sql = format!(
          "UPDATE cards SET {} WHERE id = ? AND tenant_id = ?",
          sets.join(", ")
        );
        let changed = tx.execute(&sql, rusqlite::params_from_iter(vals))?;
        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
          rusqlite::params![id],
          raw_card_from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawCard::into_card).transpose()
  }

  async fn delete_card(&self, id: CardId, tenant: &TenantId) -> Result<bool> {
    let tenant_str = tenant.as_str().to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "DELETE FROM cards WHERE id = ?1 AND tenant_id = ?2",
          rusqlite::params![id, tenant_str],
        )?;
        Ok(changed > 0)
      })
      .await?;

    Ok(removed)
  }

  async fn reorder_cards(&self, tenant: &TenantId, ids: &[CardId]) -> Result<()> {
    let tenant_str = tenant.as_str().to_owned();
    let ids = ids.to_vec();
    let now_str = encode_dt(Utc::now());

    // One transaction for the whole reassignment: a mid-list failure rolls
    // back instead of leaving a partially-reordered tenant. The tenant
    // filter on every statement means foreign ids simply match zero rows.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "UPDATE cards SET display_order = ?1, updated_at = ?2
             WHERE id = ?3 AND tenant_id = ?4",
          )?;
          for (index, id) in ids.iter().enumerate() {
            stmt.execute(rusqlite::params![index as i64, now_str, id, tenant_str])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}

// ─── ThemeStore impl ─────────────────────────────────────────────────────────

impl ThemeStore for SqliteStore {
  type Error = Error;

  async fn get_theme(&self, tenant: &TenantId) -> Result<ThemeLookup> {
    let tenant_str = tenant.as_str().to_owned();

    let raw: Option<RawTheme> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tenant_id, name, colors, typography, border_radius,
                      spacing, mode, custom_css, created_at, updated_at
               FROM themes WHERE tenant_id = ?1",
              rusqlite::params![tenant_str],
              |row| {
                Ok(RawTheme {
                  tenant_id:     row.get(0)?,
                  name:          row.get(1)?,
                  colors:        row.get(2)?,
                  typography:    row.get(3)?,
                  border_radius: row.get(4)?,
                  spacing:       row.get(5)?,
                  mode:          row.get(6)?,
                  custom_css:    row.get(7)?,
                  created_at:    row.get(8)?,
                  updated_at:    row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    match raw {
      Some(raw) => Ok(ThemeLookup {
        theme:      raw.into_theme()?,
        is_default: false,
      }),
      None => Ok(ThemeLookup {
        theme:      Theme::default_for(tenant.clone()),
        is_default: true,
      }),
    }
  }

  async fn upsert_theme(
    &self,
    tenant: &TenantId,
    fields: ThemeFields,
  ) -> Result<(Theme, bool)> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let tenant_str = tenant.as_str().to_owned();

    let name = fields.name.clone();
    let colors = serde_json::to_string(&fields.colors)?;
    let typography = serde_json::to_string(&fields.typography)?;
    let border_radius = serde_json::to_string(&fields.border_radius)?;
    let spacing = serde_json::to_string(&fields.spacing)?;
    let mode = encode_theme_mode(fields.mode).to_owned();
    let custom_css = fields.custom_css.clone();

    let (created, created_at_str) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
          .query_row(
            "SELECT created_at FROM themes WHERE tenant_id = ?1",
            rusqlite::params![tenant_str],
            |row| row.get(0),
          )
          .optional()?;

        let result = match existing {
          Some(created_at) => {
            tx.execute(
              "UPDATE themes
               SET name = ?2, colors = ?3, typography = ?4,
                   border_radius = ?5, spacing = ?6, mode = ?7,
                   custom_css = ?8, updated_at = ?9
               WHERE tenant_id = ?1",
              rusqlite::params![
                tenant_str,
                name,
                colors,
                typography,
                border_radius,
                spacing,
                mode,
                custom_css,
                now_str,
              ],
            )?;
            (false, created_at)
          }
          None => {
            tx.execute(
              "INSERT INTO themes (
                 tenant_id, name, colors, typography, border_radius,
                 spacing, mode, custom_css, created_at, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
              rusqlite::params![
                tenant_str,
                name,
                colors,
                typography,
                border_radius,
                spacing,
                mode,
                custom_css,
                now_str,
                now_str,
              ],
            )?;
            (true, now_str)
          }
        };

        tx.commit()?;
        Ok(result)
      })
      .await?;

    let theme = Theme {
      tenant_id:     tenant.clone(),
      name:          fields.name,
      colors:        fields.colors,
      typography:    fields.typography,
      border_radius: fields.border_radius,
      spacing:       fields.spacing,
      mode:          fields.mode,
      custom_css:    fields.custom_css,
      created_at:    Some(decode_dt(&created_at_str)?),
      updated_at:    Some(now),
    };

    Ok((theme, created))
  }

  async fn reset_theme(&self, tenant: &TenantId) -> Result<bool> {
    let tenant_str = tenant.as_str().to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "DELETE FROM themes WHERE tenant_id = ?1",
          rusqlite::params![tenant_str],
        )?;
        Ok(changed > 0)
      })
      .await?;

    Ok(removed)
  }
}
