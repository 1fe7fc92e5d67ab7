//! Something done (or to do) for a job opening, such as an
//! interview or a follow-up call.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use crate::{
  Error, Result,
  contact::Contact,
  entity::{Entity, UNASSIGNED_ID},
  error::require_text,
};

/// A scheduled or completed interaction with a contact.
///
/// `duration` is never negative and `description` is never blank; both are
/// checked on construction and on every later change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
  id:            i64,
  start:         DateTime<Utc>,
  #[serde(rename = "duration_secs", serialize_with = "serialize_seconds")]
  duration:      TimeDelta,
  contact:       Contact,
  description:   String,
  pub completed: bool,
}

impl Activity {
  /// Create a pending activity without an id.
  pub fn new(
    start: DateTime<Utc>,
    duration: TimeDelta,
    contact: Contact,
    description: impl Into<String>,
  ) -> Result<Self> {
    let description = description.into();
    check_duration(duration)?;
    require_text("description", &description)?;
    Ok(Self::from_parts(start, duration, contact, description))
  }

  /// Callers in this crate use this for fixed, known-good values only.
  pub(crate) fn from_parts(
    start: DateTime<Utc>,
    duration: TimeDelta,
    contact: Contact,
    description: impl Into<String>,
  ) -> Self {
    Self {
      id: UNASSIGNED_ID,
      start,
      duration,
      contact,
      description: description.into(),
      completed: false,
    }
  }

  pub fn with_id(mut self, id: i64) -> Self {
    self.id = id;
    self
  }

  pub fn with_completed(mut self, completed: bool) -> Self {
    self.completed = completed;
    self
  }

  pub fn id(&self) -> i64 { self.id }

  pub fn start(&self) -> DateTime<Utc> { self.start }

  pub fn duration(&self) -> TimeDelta { self.duration }

  pub fn end(&self) -> DateTime<Utc> { self.start + self.duration }

  pub fn contact(&self) -> &Contact { &self.contact }

  pub fn description(&self) -> &str { &self.description }

  pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
    let description = description.into();
    require_text("description", &description)?;
    self.description = description;
    Ok(())
  }

  /// Used by storage backends once the contact has been given an id.
  pub fn set_contact(&mut self, contact: Contact) { self.contact = contact; }
}

impl Entity for Activity {
  type Id = i64;

  fn id(&self) -> i64 { self.id }

  fn set_id(&mut self, id: i64) { self.id = id; }

  fn validate(&self) -> Result<()> {
    check_duration(self.duration)?;
    require_text("description", &self.description)?;
    self.contact.validate()
  }
}

impl fmt::Display for Activity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Id: {}, Start: {}, Description: {}, Contact: {}, Duration: {}, Completed: {}",
      self.id, self.start, self.description, self.contact.name, self.duration, self.completed,
    )
  }
}

fn check_duration(duration: TimeDelta) -> Result<()> {
  if duration < TimeDelta::zero() {
    return Err(Error::invalid("duration", "must be zero or positive"));
  }
  Ok(())
}

fn serialize_seconds<S: Serializer>(d: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_i64(d.num_seconds())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use proptest::prelude::*;

  use super::*;

  fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
  }

  #[test]
  fn new_activity_is_pending() {
    let activity = Activity::new(
      at(9),
      TimeDelta::minutes(30),
      Contact::new("Jane"),
      "Phone screen",
    )
    .unwrap();
    assert!(!activity.completed);
    assert_eq!(activity.id(), UNASSIGNED_ID);
    assert_eq!(activity.end(), at(9) + TimeDelta::minutes(30));
  }

  #[test]
  fn negative_duration_is_rejected() {
    let err = Activity::new(at(9), TimeDelta::seconds(-1), Contact::new("Jane"), "x")
      .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "duration", .. }));
  }

  #[test]
  fn blank_description_is_rejected() {
    for blank in ["", "   ", "\t\n"] {
      let err = Activity::new(at(9), TimeDelta::zero(), Contact::new("Jane"), blank)
        .unwrap_err();
      assert!(matches!(err, Error::InvalidArgument { name: "description", .. }));
    }
  }

  #[test]
  fn set_description_keeps_old_value_on_error() {
    let mut activity =
      Activity::new(at(9), TimeDelta::zero(), Contact::new("Jane"), "Call").unwrap();
    assert!(activity.set_description(" ").is_err());
    assert_eq!(activity.description(), "Call");
    activity.set_description("Call back").unwrap();
    assert_eq!(activity.description(), "Call back");
  }

  #[test]
  fn equality_is_structural() {
    let a = Activity::new(at(9), TimeDelta::zero(), Contact::new("Jane"), "Call").unwrap();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.completed = true;
    assert_ne!(a, b);
    assert_ne!(a, a.clone().with_id(3));
  }

  #[test]
  fn serializes_duration_in_seconds() {
    let activity =
      Activity::new(at(9), TimeDelta::minutes(15), Contact::new("Jane"), "Call").unwrap();
    let json = serde_json::to_value(&activity).unwrap();
    assert_eq!(json["duration_secs"], 900);
    assert_eq!(json["contact"]["name"], "Jane");
  }

  proptest! {
    #[test]
    fn duration_sign_decides_validity(secs in -100_000i64..100_000) {
      let result = Activity::new(at(9), TimeDelta::seconds(secs), Contact::new("Jane"), "Call");
      prop_assert_eq!(result.is_ok(), secs >= 0);
    }
  }
}
