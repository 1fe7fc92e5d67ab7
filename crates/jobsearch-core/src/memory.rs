//! [`MemoryRepository`] — a list-backed [`Repository`] with no storage
//! dependency.
//!
//! Items go in and come out as clones, so nothing the caller does to its own
//! values after a call can alter what the repository holds.

use std::fmt::{Debug, Display};

use crate::{
  Error, Result,
  entity::{Entity, UNASSIGNED_ID},
  repository::Repository,
};

type GetId<Id, Item> = Box<dyn Fn(&Item) -> Id>;
type SetId<Id, Item> = Box<dyn Fn(&mut Item, Id)>;
type NewId<Id, Item> = Box<dyn Fn(&[Item], &Item) -> Result<Id>>;
type Validate<Item> = Box<dyn Fn(&Item) -> Result<()>>;

/// An in-memory repository of `Item`s keyed by `Id`.
///
/// How ids are read, written and generated is injected at construction. The
/// `new_id` function receives the stored items and the candidate; it may mint
/// a fresh id, pass a caller-chosen one through, or fail.
pub struct MemoryRepository<Id, Item> {
  get_id:   GetId<Id, Item>,
  set_id:   SetId<Id, Item>,
  new_id:   NewId<Id, Item>,
  validate: Validate<Item>,
  items:    Vec<Item>,
  dirty:    bool,
}

impl<Id, Item> MemoryRepository<Id, Item>
where
  Id: Clone + PartialEq + Debug + Display,
  Item: Clone + PartialEq,
{
  pub fn new(
    get_id: impl Fn(&Item) -> Id + 'static,
    set_id: impl Fn(&mut Item, Id) + 'static,
    new_id: impl Fn(&[Item], &Item) -> Result<Id> + 'static,
  ) -> Self {
    Self {
      get_id:   Box::new(get_id),
      set_id:   Box::new(set_id),
      new_id:   Box::new(new_id),
      validate: Box::new(|_| Ok(())),
      items:    Vec::new(),
      dirty:    false,
    }
  }

  /// Reject items failing `validate` on create and update.
  pub fn with_validation(mut self, validate: impl Fn(&Item) -> Result<()> + 'static) -> Self {
    self.validate = Box::new(validate);
    self
  }

  /// Borrowing view over the stored items, in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &Item> { self.items.iter() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  fn position(&self, id: &Id) -> Option<usize> {
    self.items.iter().position(|item| (self.get_id)(item) == *id)
  }
}

impl<T: Entity + 'static> MemoryRepository<T::Id, T> {
  /// A repository wired to the item's own [`Entity`] binding and validation.
  pub fn for_entity(new_id: impl Fn(&[T], &T) -> Result<T::Id> + 'static) -> Self {
    Self::new(T::id, T::set_id, new_id).with_validation(T::validate)
  }
}

impl<Id, Item> Repository for MemoryRepository<Id, Item>
where
  Id: Clone + PartialEq + Debug + Display,
  Item: Clone + PartialEq,
{
  type Error = Error;
  type Id = Id;
  type Item = Item;

  fn item_id(&self, item: &Item) -> Id { (self.get_id)(item) }

  fn exists(&self, id: &Id) -> Result<bool> { Ok(self.position(id).is_some()) }

  fn get_all(&self) -> Result<Vec<Item>> { Ok(self.items.clone()) }

  fn get(&self, id: &Id) -> Result<Option<Item>> {
    Ok(self.position(id).map(|i| self.items[i].clone()))
  }

  fn create(&mut self, item: &Item) -> Result<Id> {
    (self.validate)(item)?;

    let id = (self.new_id)(&self.items, item)?;
    if self.position(&id).is_some() {
      return Err(Error::already_exists(id));
    }

    let mut stored = item.clone();
    (self.set_id)(&mut stored, id.clone());
    self.items.push(stored);
    self.dirty = true;
    Ok(id)
  }

  fn update(&mut self, item: &Item) -> Result<()> {
    (self.validate)(item)?;

    let id = (self.get_id)(item);
    let index = self.position(&id).ok_or_else(|| Error::not_found(&id))?;
    self.items[index] = item.clone();
    self.dirty = true;
    Ok(())
  }

  fn delete(&mut self, id: &Id) -> Result<()> {
    let index = self.position(id).ok_or_else(|| Error::not_found(id))?;
    self.items.remove(index);
    self.dirty = true;
    Ok(())
  }

  fn save(&mut self) -> Result<()> {
    self.dirty = false;
    Ok(())
  }

  fn dirty(&self) -> bool { self.dirty }
}

// ─── Id policies ─────────────────────────────────────────────────────────────

/// Give unassigned items one more than the largest stored id; keep an id the
/// caller already chose.
pub fn next_id<T: Entity<Id = i64>>(items: &[T], item: &T) -> Result<i64> {
  if item.id() != UNASSIGNED_ID {
    return Ok(item.id());
  }
  items
    .iter()
    .map(Entity::id)
    .max()
    .unwrap_or(UNASSIGNED_ID)
    .checked_add(1)
    .ok_or_else(|| Error::invalid("id", "no free id above the largest stored id"))
}

/// Use the id the caller chose, failing if it is already taken.
pub fn caller_id<T: Entity>(items: &[T], item: &T) -> Result<T::Id> {
  let id = item.id();
  if items.iter().any(|stored| stored.id() == id) {
    return Err(Error::already_exists(id));
  }
  Ok(id)
}
