//! An advertised position and everything done about it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::{
  Result,
  activity::Activity,
  contact::Contact,
  entity::{Entity, UNASSIGNED_ID},
  error::require_text,
};

/// An advertised position.
///
/// Activities are kept in the order they were added. An activity's contact
/// does not have to appear in `additional_contacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobOpening {
  id:                      i64,
  pub title:               String,
  pub organization:        String,
  pub url:                 Option<Url>,
  pub notes:               Option<String>,
  pub advertised_date:     DateTime<Utc>,
  pub additional_contacts: Vec<Contact>,
  pub activities:          Vec<Activity>,
}

impl JobOpening {
  pub fn new(
    title: impl Into<String>,
    organization: impl Into<String>,
    advertised_date: DateTime<Utc>,
  ) -> Self {
    Self {
      title: title.into(),
      organization: organization.into(),
      advertised_date,
      ..Self::default()
    }
  }

  pub fn with_id(mut self, id: i64) -> Self {
    self.id = id;
    self
  }

  pub fn id(&self) -> i64 { self.id }

  /// Activities not yet marked completed, earliest first.
  pub fn pending_activities(&self) -> Vec<&Activity> {
    let mut pending: Vec<&Activity> =
      self.activities.iter().filter(|a| !a.completed).collect();
    pending.sort_by_key(|a| a.start());
    pending
  }

  pub fn is_unassigned(&self) -> bool { self.id == UNASSIGNED_ID }
}

impl Entity for JobOpening {
  type Id = i64;

  fn id(&self) -> i64 { self.id }

  fn set_id(&mut self, id: i64) { self.id = id; }

  fn validate(&self) -> Result<()> {
    require_text("title", &self.title)?;
    require_text("organization", &self.organization)?;
    self.additional_contacts.iter().try_for_each(Entity::validate)?;
    self.activities.iter().try_for_each(Entity::validate)
  }
}

impl fmt::Display for JobOpening {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Id: {}, Organization: {}, Title: {}, Url: {}, AdvertisedDate: {}",
      self.id,
      self.organization,
      self.title,
      self.url.as_ref().map(Url::as_str).unwrap_or_default(),
      self.advertised_date,
    )
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeDelta, TimeZone};

  use super::*;
  use crate::Error;

  fn advertised() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap() }

  #[test]
  fn default_opening_is_empty() {
    let opening = JobOpening::default();
    assert!(opening.is_unassigned());
    assert!(opening.activities.is_empty());
    assert!(opening.additional_contacts.is_empty());
    assert!(opening.url.is_none());
    assert!(opening.title.is_empty());
  }

  #[test]
  fn title_and_organization_are_required() {
    let err = JobOpening::new(" ", "Acme", advertised()).validate().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "title", .. }));

    let err = JobOpening::new("Engineer", "", advertised()).validate().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "organization", .. }));

    JobOpening::new("Engineer", "Acme", advertised()).validate().unwrap();
  }

  #[test]
  fn invalid_nested_contact_fails_validation() {
    let mut opening = JobOpening::new("Engineer", "Acme", advertised());
    opening.additional_contacts.push(Contact::new(""));
    assert!(opening.validate().is_err());
  }

  #[test]
  fn pending_activities_are_sorted_by_start() {
    let contact = Contact::new("Jane");
    let mut opening = JobOpening::new("Engineer", "Acme", advertised());
    let late = Activity::new(advertised() + TimeDelta::days(5), TimeDelta::zero(), contact.clone(), "Late")
      .unwrap();
    let done = Activity::new(advertised(), TimeDelta::zero(), contact.clone(), "Done")
      .unwrap()
      .with_completed(true);
    let early = Activity::new(advertised() + TimeDelta::days(1), TimeDelta::zero(), contact, "Early")
      .unwrap();
    opening.activities = vec![late, done, early];

    let pending: Vec<&str> =
      opening.pending_activities().iter().map(|a| a.description()).collect();
    assert_eq!(pending, ["Early", "Late"]);
  }

  #[test]
  fn display_includes_url() {
    let mut opening = JobOpening::new("Engineer", "Acme", advertised()).with_id(4);
    opening.url = Some(Url::parse("https://jobs.example.com/42").unwrap());
    let shown = opening.to_string();
    assert!(shown.starts_with("Id: 4, Organization: Acme, Title: Engineer"));
    assert!(shown.contains("https://jobs.example.com/42"));
  }
}
