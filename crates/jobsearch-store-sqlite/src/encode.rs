//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, durations as whole
//! nanoseconds, roles as their snake_case names and URLs in serialised form.

use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use jobsearch_core::{Activity, Contact, ContactRole, Entity, JobOpening};
use url::Url;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── TimeDelta ───────────────────────────────────────────────────────────────

/// Durations beyond roughly 292 years do not fit the column.
pub fn encode_duration(d: TimeDelta) -> Result<i64> {
  d.num_nanoseconds().ok_or_else(|| {
    jobsearch_core::Error::invalid("duration", format!("{d} is too long to store")).into()
  })
}

pub fn decode_duration(ns: i64) -> TimeDelta { TimeDelta::nanoseconds(ns) }

// ─── ContactRole ─────────────────────────────────────────────────────────────

pub fn encode_role(role: ContactRole) -> &'static str {
  match role {
    ContactRole::Recruiter => "recruiter",
    ContactRole::HumanResources => "human_resources",
    ContactRole::HiringManager => "hiring_manager",
  }
}

/// A missing role reads back as the default.
pub fn decode_role(s: Option<&str>) -> Result<ContactRole> {
  match s {
    None => Ok(ContactRole::default()),
    Some(s) => ContactRole::from_str(s)
      .map_err(|_| Error::Decode(format!("unknown contact role: {s:?}"))),
  }
}

// ─── Url ─────────────────────────────────────────────────────────────────────

pub fn encode_url(url: Option<&Url>) -> Option<String> { url.map(Url::to_string) }

pub fn decode_url(s: Option<&str>) -> Result<Option<Url>> {
  Ok(s.map(Url::parse).transpose()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str =
  "c.id, c.name, c.phone, c.email, c.notes, c.organization, c.role";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:           i64,
  pub name:         String,
  pub phone:        Option<String>,
  pub email:        Option<String>,
  pub notes:        Option<String>,
  pub organization: Option<String>,
  pub role:         Option<String>,
}

impl RawContact {
  /// Read [`CONTACT_COLUMNS`] starting at column `offset`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(offset)?,
      name:         row.get(offset + 1)?,
      phone:        row.get(offset + 2)?,
      email:        row.get(offset + 3)?,
      notes:        row.get(offset + 4)?,
      organization: row.get(offset + 5)?,
      role:         row.get(offset + 6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    let mut contact = Contact::with_id(self.id, self.name);
    contact.phone = self.phone;
    contact.email = self.email;
    contact.notes = self.notes;
    contact.organization = self.organization;
    contact.role = decode_role(self.role.as_deref())?;
    Ok(contact)
  }
}

/// Column list matching [`RawActivity::from_row`]; joins `contacts c`.
pub const ACTIVITY_COLUMNS: &str =
  "a.id, a.start, a.duration_ns, a.description, a.completed, \
   c.id, c.name, c.phone, c.email, c.notes, c.organization, c.role";

/// Raw values read from an `activities` row joined with its contact.
pub struct RawActivity {
  pub id:          i64,
  pub start:       String,
  pub duration_ns: i64,
  pub description: Option<String>,
  pub completed:   bool,
  pub contact:     RawContact,
}

impl RawActivity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      start:       row.get(1)?,
      duration_ns: row.get(2)?,
      description: row.get(3)?,
      completed:   row.get(4)?,
      contact:     RawContact::from_row(row, 5)?,
    })
  }

  pub fn into_activity(self) -> Result<Activity> {
    let activity = Activity::new(
      decode_dt(&self.start)?,
      decode_duration(self.duration_ns),
      self.contact.into_contact()?,
      self.description.unwrap_or_default(),
    )?;
    Ok(activity.with_id(self.id).with_completed(self.completed))
  }
}

/// Column list matching [`RawJobOpening::from_row`].
pub const JOB_OPENING_COLUMNS: &str =
  "j.id, j.title, j.organization, j.url, j.notes, j.advertised_date";

/// Raw values read directly from a `job_openings` row.
pub struct RawJobOpening {
  pub id:              i64,
  pub title:           String,
  pub organization:    String,
  pub url:             Option<String>,
  pub notes:           Option<String>,
  pub advertised_date: String,
}

impl RawJobOpening {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      title:           row.get(1)?,
      organization:    row.get(2)?,
      url:             row.get(3)?,
      notes:           row.get(4)?,
      advertised_date: row.get(5)?,
    })
  }

  /// Build the opening; contacts and activities are loaded separately.
  pub fn into_job_opening(
    self,
    additional_contacts: Vec<Contact>,
    activities: Vec<Activity>,
  ) -> Result<JobOpening> {
    let mut opening =
      JobOpening::new(self.title, self.organization, decode_dt(&self.advertised_date)?);
    opening.set_id(self.id);
    opening.url = decode_url(self.url.as_deref())?;
    opening.notes = self.notes;
    opening.additional_contacts = additional_contacts;
    opening.activities = activities;
    Ok(opening)
  }
}
