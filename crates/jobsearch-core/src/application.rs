//! Recording a job application.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{activity::Activity, contact::Contact, job_opening::JobOpening};

/// How long after applying to chase the advertiser.
pub const APPLICATION_FOLLOW_UP_DELAY: TimeDelta = TimeDelta::days(3);

pub const APPLICATION_FOLLOW_UP_DURATION: TimeDelta = TimeDelta::minutes(15);

pub const APPLICATION_DESCRIPTION: &str = "Applied.";

pub const APPLICATION_FOLLOW_UP_DESCRIPTION: &str = "Application follow up. Reach out to the \
                                                     advertiser to ensure they have your \
                                                     details and answer any questions.";

impl JobOpening {
  /// Record an application sent at `application_time` through `contact`.
  ///
  /// Appends a completed, zero-length "Applied." activity and a pending
  /// follow-up three days later. No other field changes.
  pub fn apply(&mut self, application_time: DateTime<Utc>, contact: &Contact) {
    self.activities.push(
      Activity::from_parts(
        application_time,
        TimeDelta::zero(),
        contact.clone(),
        APPLICATION_DESCRIPTION,
      )
      .with_completed(true),
    );
    self.activities.push(Activity::from_parts(
      application_time + APPLICATION_FOLLOW_UP_DELAY,
      APPLICATION_FOLLOW_UP_DURATION,
      contact.clone(),
      APPLICATION_FOLLOW_UP_DESCRIPTION,
    ));
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use proptest::prelude::*;

  use super::*;

  fn opening() -> JobOpening {
    let mut opening = JobOpening::new(
      "Engineer",
      "Acme",
      Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap(),
    );
    opening.notes = Some("Referred by a friend".into());
    opening.additional_contacts.push(Contact::with_id(2, "Bob"));
    opening
  }

  #[test]
  fn follow_up_text_is_fixed() {
    assert_eq!(
      APPLICATION_FOLLOW_UP_DESCRIPTION,
      "Application follow up. Reach out to the advertiser to ensure they have your details \
       and answer any questions."
    );
  }

  #[test]
  fn apply_adds_application_and_follow_up() {
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
    let contact = Contact::with_id(1, "Jane").organization("Acme");
    let mut opening = JobOpening::default();

    opening.apply(when, &contact);

    assert_eq!(opening.activities.len(), 2);
    let expected_applied =
      Activity::new(when, TimeDelta::zero(), contact.clone(), "Applied.")
        .unwrap()
        .with_completed(true);
    let expected_follow_up = Activity::new(
      when + TimeDelta::days(3),
      TimeDelta::minutes(15),
      contact.clone(),
      APPLICATION_FOLLOW_UP_DESCRIPTION,
    )
    .unwrap();
    assert_eq!(opening.activities.iter().filter(|a| **a == expected_applied).count(), 1);
    assert_eq!(opening.activities.iter().filter(|a| **a == expected_follow_up).count(), 1);
  }

  proptest! {
    #[test]
    fn apply_leaves_other_fields_alone(offset_mins in 0i64..1_000_000, applications in 1usize..4) {
      let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
      let when = base + TimeDelta::minutes(offset_mins);
      let contact = Contact::new("Jane");
      let before = opening();
      let mut after = before.clone();

      for _ in 0..applications {
        after.apply(when, &contact);
      }

      prop_assert_eq!(&after.title, &before.title);
      prop_assert_eq!(&after.organization, &before.organization);
      prop_assert_eq!(&after.url, &before.url);
      prop_assert_eq!(&after.notes, &before.notes);
      prop_assert_eq!(&after.additional_contacts, &before.additional_contacts);
      prop_assert_eq!(after.activities.len(), 2 * applications);
      prop_assert!(after.activities.iter().all(|a| a.start() >= when));
    }
  }
}
