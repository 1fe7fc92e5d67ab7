//! [`SqliteContext`] — the unit of work shared by SQLite repositories.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};

use crate::{
  Result,
  config::StoreConfig,
  schema::{DROP_SCHEMA, SCHEMA},
};

/// One SQLite connection plus the transaction that holds unsaved changes.
///
/// The first write through any repository opens a transaction; reads on the
/// same context see those uncommitted rows. [`save_changes`](Self::save_changes)
/// commits. Dropping a context with unsaved changes rolls them back.
///
/// This type is not thread safe. Callers sharing it must synchronise
/// externally.
pub struct SqliteContext {
  conn: Connection,
}

impl SqliteContext {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let context = Self { conn: Connection::open(path)? };
    context.init_schema()?;
    tracing::info!(path = %path.display(), "opened job search store");
    Ok(context)
  }

  /// Open an in-memory database, mostly for tests.
  pub fn open_in_memory() -> Result<Self> {
    let context = Self { conn: Connection::open_in_memory()? };
    context.init_schema()?;
    Ok(context)
  }

  pub fn from_config(config: &StoreConfig) -> Result<Self> {
    let context = Self::open(config.resolved_path())?;
    context
      .conn
      .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))?;
    Ok(context)
  }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  /// Discard unsaved changes, drop every table and rebuild the schema.
  ///
  /// Test fixtures call this to start from an empty database.
  pub fn recreate(&self) -> Result<()> {
    self.discard_changes()?;
    self.conn.execute_batch(DROP_SCHEMA)?;
    self.init_schema()?;
    tracing::info!("recreated job search schema");
    Ok(())
  }

  pub(crate) fn connection(&self) -> &Connection { &self.conn }

  /// Run one repository write inside the unit-of-work transaction, opening it
  /// if needed. A failed write is rolled back on its own; earlier unsaved
  /// writes stay pending. If it was the first write, nothing stays pending.
  pub(crate) fn write<R>(&self, op: impl FnOnce(&Connection) -> Result<R>) -> Result<R> {
    let began = self.conn.is_autocommit();
    if began {
      self.conn.execute_batch("BEGIN")?;
    }
    self.conn.execute_batch("SAVEPOINT repository_write")?;
    match op(&self.conn) {
      Ok(value) => {
        self.conn.execute_batch("RELEASE repository_write")?;
        Ok(value)
      }
      Err(e) if began => {
        self.conn.execute_batch("ROLLBACK")?;
        Err(e)
      }
      Err(e) => {
        self
          .conn
          .execute_batch("ROLLBACK TO repository_write; RELEASE repository_write")?;
        Err(e)
      }
    }
  }

  /// Whether writes are waiting for [`save_changes`](Self::save_changes).
  pub fn has_changes(&self) -> bool { !self.conn.is_autocommit() }

  /// Commit pending writes. A no-op when nothing is pending.
  pub fn save_changes(&self) -> Result<()> {
    if self.has_changes() {
      self.conn.execute_batch("COMMIT")?;
      tracing::debug!("committed pending changes");
    }
    Ok(())
  }

  /// Roll back pending writes. A no-op when nothing is pending.
  pub fn discard_changes(&self) -> Result<()> {
    if self.has_changes() {
      self.conn.execute_batch("ROLLBACK")?;
      tracing::debug!("discarded pending changes");
    }
    Ok(())
  }

  /// Whether `table` exists in the schema.
  pub(crate) fn table_exists(&self, table: &str) -> Result<bool> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
          rusqlite::params![table],
          |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false),
    )
  }

  /// Names of the primary-key columns of `table`.
  pub(crate) fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
    let mut stmt = self
      .conn
      .prepare("SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk")?;
    let columns = stmt
      .query_map(rusqlite::params![table], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
  }
}

impl Drop for SqliteContext {
  fn drop(&mut self) {
    if self.has_changes() {
      tracing::warn!("dropping store context with unsaved changes; rolling back");
    }
  }
}
