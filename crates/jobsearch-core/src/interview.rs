//! Scheduling interviews.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{Result, activity::Activity, contact::Contact, job_opening::JobOpening};

pub const INTERVIEW_FOLLOW_UP_DELAY: TimeDelta = TimeDelta::days(1);

pub const INTERVIEW_FOLLOW_UP_DURATION: TimeDelta = TimeDelta::minutes(15);

pub const INTERVIEW_FOLLOW_UP_DESCRIPTION: &str = "Interview follow up. Thank the interviewers \
                                                   for their time and ask if you can help \
                                                   them further.";

impl JobOpening {
  /// Schedule an interview plus a thank-you follow-up the next day.
  ///
  /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
  /// `duration` is negative or `description` is blank, in which case nothing
  /// is appended.
  pub fn add_interview(
    &mut self,
    start: DateTime<Utc>,
    duration: TimeDelta,
    contact: &Contact,
    description: &str,
  ) -> Result<()> {
    let interview = Activity::new(start, duration, contact.clone(), description)?;
    let follow_up = Activity::from_parts(
      start + INTERVIEW_FOLLOW_UP_DELAY,
      INTERVIEW_FOLLOW_UP_DURATION,
      contact.clone(),
      INTERVIEW_FOLLOW_UP_DESCRIPTION,
    );
    self.activities.extend([interview, follow_up]);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use proptest::prelude::*;

  use super::*;
  use crate::Error;

  fn start() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap() }

  #[test]
  fn add_interview_appends_interview_and_follow_up() {
    let contact = Contact::with_id(3, "Hiring Manager");
    let mut opening = JobOpening::default();

    opening
      .add_interview(start(), TimeDelta::hours(1), &contact, "Technical interview")
      .unwrap();

    assert_eq!(opening.activities.len(), 2);
    let interview = &opening.activities[0];
    assert_eq!(interview.start(), start());
    assert_eq!(interview.duration(), TimeDelta::hours(1));
    assert_eq!(interview.description(), "Technical interview");
    assert_eq!(interview.contact(), &contact);
    assert!(!interview.completed);

    let follow_up = &opening.activities[1];
    assert_eq!(follow_up.start(), start() + TimeDelta::days(1));
    assert_eq!(follow_up.duration(), TimeDelta::minutes(15));
    assert_eq!(follow_up.description(), INTERVIEW_FOLLOW_UP_DESCRIPTION);
    assert_eq!(follow_up.contact(), &contact);
    assert!(!follow_up.completed);
  }

  #[test]
  fn negative_duration_fails_without_changes() {
    let mut opening = JobOpening::default();
    let err = opening
      .add_interview(start(), TimeDelta::minutes(-5), &Contact::new("Jane"), "Interview")
      .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "duration", .. }));
    assert!(opening.activities.is_empty());
  }

  #[test]
  fn blank_description_fails_without_changes() {
    let mut opening = JobOpening::default();
    for blank in ["", " ", "\n"] {
      let err = opening
        .add_interview(start(), TimeDelta::hours(1), &Contact::new("Jane"), blank)
        .unwrap_err();
      assert!(matches!(err, Error::InvalidArgument { name: "description", .. }));
    }
    assert!(opening.activities.is_empty());
  }

  #[test]
  fn interview_after_application_keeps_order() {
    let contact = Contact::new("Jane");
    let mut opening = JobOpening::default();
    opening.apply(start() - TimeDelta::days(7), &contact);
    opening.add_interview(start(), TimeDelta::zero(), &contact, "Chat").unwrap();

    let descriptions: Vec<&str> = opening.activities.iter().map(|a| a.description()).collect();
    assert_eq!(descriptions[2], "Chat");
    assert_eq!(descriptions[3], INTERVIEW_FOLLOW_UP_DESCRIPTION);
  }

  proptest! {
    #[test]
    fn other_fields_are_untouched(mins in 0i64..600, title in "[A-Za-z ]{1,20}") {
      let mut opening = JobOpening::new(title.clone(), "Acme", start());
      opening.additional_contacts.push(Contact::new("Bob"));
      let before = opening.clone();

      opening
        .add_interview(start(), TimeDelta::minutes(mins), &Contact::new("Jane"), "Onsite")
        .unwrap();

      prop_assert_eq!(&opening.title, &title);
      prop_assert_eq!(&opening.organization, &before.organization);
      prop_assert_eq!(&opening.url, &before.url);
      prop_assert_eq!(&opening.notes, &before.notes);
      prop_assert_eq!(&opening.additional_contacts, &before.additional_contacts);
      prop_assert_eq!(opening.activities.len(), 2);
    }
  }
}
