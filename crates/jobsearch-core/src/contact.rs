//! A person met during the search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, UNASSIGNED_ID},
  error::require_text,
};

/// The part a contact plays in a hiring process.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactRole {
  #[default]
  Recruiter,
  HumanResources,
  HiringManager,
}

/// A recruiter, HR person or hiring manager.
///
/// Equality is structural over every field, including the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  id:               i64,
  pub name:         String,
  pub phone:        Option<String>,
  pub email:        Option<String>,
  pub notes:        Option<String>,
  pub organization: Option<String>,
  #[serde(default)]
  pub role:         ContactRole,
}

impl Contact {
  /// A contact without an id; a repository assigns one on create.
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  /// A contact with a caller-chosen id.
  pub fn with_id(id: i64, name: impl Into<String>) -> Self {
    Self { id, ..Self::new(name) }
  }

  pub fn id(&self) -> i64 { self.id }

  pub fn organization(mut self, organization: impl Into<String>) -> Self {
    self.organization = Some(organization.into());
    self
  }

  pub fn role(mut self, role: ContactRole) -> Self {
    self.role = role;
    self
  }

  pub fn is_unassigned(&self) -> bool { self.id == UNASSIGNED_ID }
}

impl Entity for Contact {
  type Id = i64;

  fn id(&self) -> i64 { self.id }

  fn set_id(&mut self, id: i64) { self.id = id; }

  fn validate(&self) -> Result<()> { require_text("name", &self.name) }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Id: {}, Name: {}, Phone: {}, Email: {}, Notes: {}, Organization: {}, Role: {}",
      self.id,
      self.name,
      self.phone.as_deref().unwrap_or_default(),
      self.email.as_deref().unwrap_or_default(),
      self.notes.as_deref().unwrap_or_default(),
      self.organization.as_deref().unwrap_or_default(),
      self.role,
    )
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;
  use crate::Error;

  #[test]
  fn new_contact_is_unassigned() {
    let contact = Contact::new("Peter Smith").organization("Uber Recruiters");
    assert!(contact.is_unassigned());
    assert_eq!(contact.organization.as_deref(), Some("Uber Recruiters"));
    assert_eq!(contact.role, ContactRole::Recruiter);
  }

  #[test]
  fn equality_covers_id() {
    let a = Contact::with_id(1, "Jane Doe");
    let mut b = Contact::with_id(2, "Jane Doe");
    assert_ne!(a, b);
    b.set_id(1);
    assert_eq!(a, b);
    b.email = Some("jane@example.com".into());
    assert_ne!(a, b);
  }

  #[test]
  fn blank_name_is_invalid() {
    let err = Contact::new("  ").validate().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "name", .. }));
  }

  #[test]
  fn role_text_form() {
    assert_eq!(ContactRole::HumanResources.to_string(), "human_resources");
    assert_eq!(
      ContactRole::from_str("hiring_manager").unwrap(),
      ContactRole::HiringManager
    );

    let json = serde_json::to_value(Contact::new("A").role(ContactRole::HiringManager))
      .unwrap();
    assert_eq!(json["role"], "hiring_manager");
    assert_eq!(json["id"], 0);
  }

  #[test]
  fn display_lists_fields() {
    let contact = Contact::with_id(7, "Jane").role(ContactRole::HumanResources);
    let shown = contact.to_string();
    assert!(shown.starts_with("Id: 7, Name: Jane"));
    assert!(shown.ends_with("Role: human_resources"));
  }
}
