//! SQL schema for the Compass SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cards (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id       TEXT NOT NULL,
    display_order   INTEGER NOT NULL DEFAULT 0,
    kind            TEXT NOT NULL,   -- 'text' | 'image' | 'video'
    title           TEXT,
    content         TEXT,            -- body text, or a pasted video URL
    media_url       TEXT,            -- uploaded image/video URL
    media_mime_type TEXT,            -- informational only
    created_at      TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at      TEXT NOT NULL,
    created_by      TEXT             -- advisory, not referentially enforced
);

-- Covering index for the hot path: tenant-scoped ordered listing.
-- Deliberately NOT unique on (tenant_id, display_order): duplicate order
-- values are tolerated so concurrent reorders never conflict on a
-- uniqueness constraint. Only sort order is meaningful.
CREATE INDEX IF NOT EXISTS cards_tenant_order_idx
    ON cards(tenant_id, display_order);

CREATE TABLE IF NOT EXISTS themes (
    tenant_id     TEXT PRIMARY KEY,  -- at most one theme row per tenant
    name          TEXT NOT NULL,
    colors        TEXT NOT NULL,     -- JSON token group
    typography    TEXT NOT NULL,     -- JSON token group
    border_radius TEXT NOT NULL,     -- JSON token group
    spacing       TEXT NOT NULL,     -- JSON token group
    mode          TEXT NOT NULL,     -- 'light' | 'dark' | 'auto'
    custom_css    TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

PRAGMA user_version = 1;
";
