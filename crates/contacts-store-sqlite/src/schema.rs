//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id        TEXT PRIMARY KEY,
    owner_id  TEXT NOT NULL,
    name      TEXT NOT NULL,
    email     TEXT NOT NULL,
    phone     TEXT NOT NULL,
    favorite  INTEGER NOT NULL DEFAULT 0 CHECK (favorite IN (0, 1))
);

-- Every lookup is keyed on (owner_id, id).
CREATE INDEX IF NOT EXISTS contacts_owner_idx ON contacts(owner_id, id);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` and `RETURNING` clause, in the order
/// [`RawContact::from_row`](crate::encode::RawContact::from_row) reads them.
pub const COLUMNS: &str = "id, owner_id, name, email, phone, favorite";
