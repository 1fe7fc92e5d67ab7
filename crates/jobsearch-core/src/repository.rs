//! The `Repository` trait: a storage-agnostic CRUD facade over one item type.
//!
//! The trait is implemented by [`MemoryRepository`](crate::memory::MemoryRepository)
//! and by storage backends (e.g. `jobsearch-store-sqlite`). Front ends depend
//! on this abstraction, not on any concrete backend.

use std::fmt::{Debug, Display};

/// Create, read, update and delete items of one type, keyed by an identifier.
///
/// Mutations are buffered until [`save`](Repository::save); [`dirty`](Repository::dirty)
/// reports whether any are pending. Reads always reflect pending mutations.
///
/// Dropping a repository releases any storage handle it opened itself, but
/// never one the caller lent it.
pub trait Repository {
  type Id: Clone + PartialEq + Debug + Display;
  type Item: Clone + PartialEq;
  type Error: std::error::Error + From<crate::Error> + 'static;

  /// The identifier of `item`. Pure; safe to call from inside predicates.
  fn item_id(&self, item: &Self::Item) -> Self::Id;

  /// Whether an item with `id` is visible, including unsaved additions.
  fn exists(&self, id: &Self::Id) -> Result<bool, Self::Error>;

  /// Every visible item.
  fn get_all(&self) -> Result<Vec<Self::Item>, Self::Error>;

  /// The item with `id`, or `None` if there is none.
  fn get(&self, id: &Self::Id) -> Result<Option<Self::Item>, Self::Error>;

  /// Store a new item and return the id it was stored under.
  ///
  /// Fails with `InvalidArgument` if the item does not validate and with
  /// `AlreadyExists` if its id is taken.
  fn create(&mut self, item: &Self::Item) -> Result<Self::Id, Self::Error>;

  /// Replace the stored values of an existing item.
  ///
  /// Fails with `InvalidArgument` if the item does not validate and with
  /// `NotFound` if no item has its id.
  fn update(&mut self, item: &Self::Item) -> Result<(), Self::Error>;

  /// Remove the item with `id`. Fails with `NotFound` if there is none.
  fn delete(&mut self, id: &Self::Id) -> Result<(), Self::Error>;

  /// Commit pending changes. Calling it with nothing pending is a no-op.
  fn save(&mut self) -> Result<(), Self::Error>;

  /// Whether create, update or delete has been called since the last save.
  fn dirty(&self) -> bool;
}
