//! [`SqliteRepository`] — the SQLite implementation of [`Repository`].

use std::{marker::PhantomData, ops::Deref, path::Path};

use jobsearch_core::{Error as CoreError, Repository};

use crate::{Error, Result, config::StoreConfig, context::SqliteContext, record::Record};

/// A context the repository opened itself, or one the caller lent it.
enum ContextHandle<'c> {
  Owned(SqliteContext),
  Borrowed(&'c SqliteContext),
}

impl Deref for ContextHandle<'_> {
  type Target = SqliteContext;

  fn deref(&self) -> &SqliteContext {
    match self {
      Self::Owned(context) => context,
      Self::Borrowed(context) => *context,
    }
  }
}

/// A repository of `T` backed by a [`SqliteContext`].
///
/// Several repositories can share one borrowed context; saving through any of
/// them commits the writes of all. A context the repository opened itself is
/// closed when the repository is dropped, discarding unsaved changes.
///
/// This type is not thread safe.
pub struct SqliteRepository<'c, T: Record> {
  context: ContextHandle<'c>,
  dirty:   bool,
  _marker: PhantomData<T>,
}

impl<'c, T: Record> SqliteRepository<'c, T> {
  /// Use a caller-supplied context. The repository never closes it.
  pub fn new(context: &'c SqliteContext) -> Result<Self> {
    Self::bind(ContextHandle::Borrowed(context))
  }

  fn bind(context: ContextHandle<'c>) -> Result<Self> {
    check_binding(&context, T::TABLE)?;
    Ok(Self { context, dirty: false, _marker: PhantomData })
  }

  pub fn context(&self) -> &SqliteContext { &self.context }

  fn check_valid(item: &T) -> Result<()> { Ok(item.validate()?) }
}

impl<T: Record> SqliteRepository<'static, T> {
  /// Open a private context on the database at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::bind(ContextHandle::Owned(SqliteContext::open(path)?))
  }

  /// Open a private in-memory database.
  pub fn open_in_memory() -> Result<Self> {
    Self::bind(ContextHandle::Owned(SqliteContext::open_in_memory()?))
  }

  pub fn from_config(config: &StoreConfig) -> Result<Self> {
    Self::bind(ContextHandle::Owned(SqliteContext::from_config(config)?))
  }
}

/// The table must exist and be keyed by a single `id` column.
pub(crate) fn check_binding(context: &SqliteContext, table: &str) -> Result<()> {
  if !context.table_exists(table)? {
    return Err(CoreError::Configuration(format!("no table named {table:?}")).into());
  }
  match context.primary_key_columns(table)?.as_slice() {
    [only] if only == "id" => Ok(()),
    [] => Err(CoreError::Configuration(format!("table {table:?} has no id column")).into()),
    [other] => Err(
      CoreError::Configuration(format!("table {table:?} is keyed by {other:?}, not \"id\""))
        .into(),
    ),
    many => Err(
      CoreError::Configuration(format!(
        "table {table:?} has {} id columns: {many:?}",
        many.len()
      ))
      .into(),
    ),
  }
}

impl<T: Record> Repository for SqliteRepository<'_, T> {
  type Error = Error;
  type Id = i64;
  type Item = T;

  fn item_id(&self, item: &T) -> i64 { item.id() }

  fn exists(&self, id: &i64) -> Result<bool> {
    T::contains(self.context.connection(), *id)
  }

  fn get_all(&self) -> Result<Vec<T>> { T::load_all(self.context.connection()) }

  fn get(&self, id: &i64) -> Result<Option<T>> { T::load(self.context.connection(), *id) }

  fn create(&mut self, item: &T) -> Result<i64> {
    Self::check_valid(item)?;
    let id = item.id();
    if id != jobsearch_core::UNASSIGNED_ID && self.exists(&id)? {
      return Err(CoreError::already_exists(id).into());
    }

    let id = self.context.write(|conn| item.insert(conn))?;
    self.dirty = true;
    tracing::debug!(table = T::TABLE, id, "created");
    Ok(id)
  }

  fn update(&mut self, item: &T) -> Result<()> {
    Self::check_valid(item)?;
    let id = item.id();
    if !self.exists(&id)? {
      return Err(CoreError::not_found(id).into());
    }

    self.context.write(|conn| item.update(conn))?;
    self.dirty = true;
    tracing::debug!(table = T::TABLE, id, "updated");
    Ok(())
  }

  fn delete(&mut self, id: &i64) -> Result<()> {
    if !self.exists(id)? {
      return Err(CoreError::not_found(id).into());
    }

    self.context.write(|conn| T::remove(conn, *id))?;
    self.dirty = true;
    tracing::debug!(table = T::TABLE, id, "deleted");
    Ok(())
  }

  fn save(&mut self) -> Result<()> {
    self.context.save_changes()?;
    self.dirty = false;
    Ok(())
  }

  fn dirty(&self) -> bool { self.dirty }
}

impl<T: Record> std::fmt::Debug for SqliteRepository<'_, T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteRepository")
      .field("table", &T::TABLE)
      .field("owned", &matches!(self.context, ContextHandle::Owned(_)))
      .field("dirty", &self.dirty)
      .finish()
  }
}
