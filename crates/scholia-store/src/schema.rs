//! SQL schema for the SQLite key-value backend.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per store snapshot. The value is the whole serialized envelope
-- and is replaced, never patched.
CREATE TABLE IF NOT EXISTS storage (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL   -- RFC 3339 UTC of the last write
);

PRAGMA user_version = 1;
";
