//! SQL schema for the explore SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per ordered (actor, recipient) pair. Rows are overwritten by
-- later decisions and never deleted.
CREATE TABLE IF NOT EXISTS decisions (
    actor_id      TEXT    NOT NULL,   -- lowercase hyphenated UUID
    recipient_id  TEXT    NOT NULL,
    liked         INTEGER NOT NULL,   -- 1 = like, 0 = pass
    updated_at    INTEGER NOT NULL,   -- Unix microseconds; server-assigned
    PRIMARY KEY (actor_id, recipient_id),
    CHECK (actor_id != recipient_id)
);

CREATE INDEX IF NOT EXISTS decisions_recipient_idx
    ON decisions(recipient_id, liked, updated_at);

PRAGMA user_version = 1;
";
