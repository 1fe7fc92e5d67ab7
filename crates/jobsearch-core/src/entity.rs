//! The binding between a repository and the items it stores.
//!
//! Repositories never inspect an item's shape at runtime. Instead each item
//! type states how its identifier is read and written and what makes a value
//! acceptable for storage.

use std::fmt::{Debug, Display};

use crate::Result;

/// Identifier value meaning "not yet assigned". Repositories replace it with a
/// fresh id on create.
pub const UNASSIGNED_ID: i64 = 0;

/// An item with a unique identifier.
pub trait Entity: Clone + PartialEq {
  type Id: Clone + PartialEq + Debug + Display;

  /// Read the identifier. Must be free of side effects.
  fn id(&self) -> Self::Id;

  /// Overwrite the identifier. Only repositories call this.
  fn set_id(&mut self, id: Self::Id);

  /// Check the item is complete enough to be stored.
  fn validate(&self) -> Result<()> { Ok(()) }
}
