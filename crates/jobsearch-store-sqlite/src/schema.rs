//! SQL schema for the job search SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS job_openings (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    organization    TEXT NOT NULL,
    url             TEXT,            -- unbounded; serialised URL
    notes           TEXT,
    advertised_date TEXT NOT NULL    -- RFC 3339 UTC
);

-- A contact belongs to at most one job opening (its additional contacts).
CREATE TABLE IF NOT EXISTS contacts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    phone          TEXT,
    email          TEXT,
    notes          TEXT,
    organization   TEXT,
    role           TEXT,             -- 'recruiter' | 'human_resources' | 'hiring_manager'
    job_opening_id INTEGER REFERENCES job_openings(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS activities (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    start          TEXT NOT NULL,    -- RFC 3339 UTC
    duration_ns    INTEGER NOT NULL CHECK (duration_ns >= 0),
    description    TEXT,
    completed      INTEGER NOT NULL DEFAULT 0,
    contact_id     INTEGER NOT NULL REFERENCES contacts(id),
    job_opening_id INTEGER REFERENCES job_openings(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS contacts_job_opening_idx   ON contacts(job_opening_id);
CREATE INDEX IF NOT EXISTS activities_job_opening_idx ON activities(job_opening_id);
CREATE INDEX IF NOT EXISTS activities_contact_idx     ON activities(contact_id);

PRAGMA user_version = 1;
";

/// Drops every table so [`SCHEMA`] can rebuild them from scratch.
pub const DROP_SCHEMA: &str = "
DROP TABLE IF EXISTS activities;
DROP TABLE IF EXISTS contacts;
DROP TABLE IF EXISTS job_openings;
";
