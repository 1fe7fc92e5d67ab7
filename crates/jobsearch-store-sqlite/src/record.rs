//! [`Record`] — how an entity maps onto its table, and the implementations
//! for the job search entities.
//!
//! Nested values are stored relationally: an activity references its contact
//! by `contact_id`; a job opening owns its activities (`job_opening_id`,
//! cascading) and its additional contacts (`job_opening_id`, set null on
//! delete).
//!
//! Writing an item also writes the contacts nested in it. A contact with an
//! id gets that row inserted or overwritten. Unassigned contacts get a new
//! row, except that equal ones within the same write share a single row.

use jobsearch_core::{Activity, Contact, Entity, JobOpening, UNASSIGNED_ID};
use rusqlite::{Connection, OptionalExtension as _};

use crate::{
  Result,
  encode::{
    ACTIVITY_COLUMNS, CONTACT_COLUMNS, JOB_OPENING_COLUMNS, RawActivity, RawContact,
    RawJobOpening, encode_dt, encode_duration, encode_role, encode_url,
  },
};

/// The binding between an entity type and its backing table.
///
/// The table must have exactly one primary-key column, named `id`; the
/// repository checks this when it is constructed.
pub trait Record: Entity<Id = i64> + Sized {
  const TABLE: &'static str;

  /// Insert the item and everything it owns. Returns the row id, which is the
  /// item's own id unless that was unassigned.
  fn insert(&self, conn: &Connection) -> Result<i64>;

  /// Overwrite the stored values of the row with the item's id.
  fn update(&self, conn: &Connection) -> Result<()>;

  fn load(conn: &Connection, id: i64) -> Result<Option<Self>>;

  fn load_all(conn: &Connection) -> Result<Vec<Self>>;

  /// Whether a row with `id` exists, without loading it.
  fn contains(conn: &Connection, id: i64) -> Result<bool> { row_exists(conn, Self::TABLE, id) }

  /// Delete the row. Owned rows follow the schema's `ON DELETE` rules.
  fn remove(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
      &format!("DELETE FROM {} WHERE id = ?1", Self::TABLE),
      rusqlite::params![id],
    )?;
    Ok(())
  }
}

/// `NULL` lets SQLite pick the id.
fn explicit_id(id: i64) -> Option<i64> { (id != UNASSIGNED_ID).then_some(id) }

fn row_exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
  Ok(
    conn
      .query_row(
        &format!("SELECT 1 FROM {table} WHERE id = ?1"),
        rusqlite::params![id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── Contact ─────────────────────────────────────────────────────────────────

impl Record for Contact {
  const TABLE: &'static str = "contacts";

  fn insert(&self, conn: &Connection) -> Result<i64> {
    conn.execute(
      "INSERT INTO contacts (id, name, phone, email, notes, organization, role)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      rusqlite::params![
        explicit_id(self.id()),
        self.name,
        self.phone,
        self.email,
        self.notes,
        self.organization,
        encode_role(self.role),
      ],
    )?;
    Ok(conn.last_insert_rowid())
  }

  fn update(&self, conn: &Connection) -> Result<()> {
    conn.execute(
      "UPDATE contacts
       SET name = ?2, phone = ?3, email = ?4, notes = ?5, organization = ?6, role = ?7
       WHERE id = ?1",
      rusqlite::params![
        self.id(),
        self.name,
        self.phone,
        self.email,
        self.notes,
        self.organization,
        encode_role(self.role),
      ],
    )?;
    Ok(())
  }

  fn load(conn: &Connection, id: i64) -> Result<Option<Self>> {
    let raw = conn
      .query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts c WHERE c.id = ?1"),
        rusqlite::params![id],
        |row| RawContact::from_row(row, 0),
      )
      .optional()?;
    raw.map(RawContact::into_contact).transpose()
  }

  fn load_all(conn: &Connection) -> Result<Vec<Self>> {
    query_contacts(conn, "", rusqlite::params![])
  }
}

fn query_contacts(
  conn: &Connection,
  filter: &str,
  params: impl rusqlite::Params,
) -> Result<Vec<Contact>> {
  let mut stmt =
    conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts c {filter} ORDER BY c.id"))?;
  let raws = stmt
    .query_map(params, |row| RawContact::from_row(row, 0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawContact::into_contact).collect()
}

/// Contact rows written during one repository call.
#[derive(Default)]
struct ContactRows {
  inserted: Vec<Contact>,
}

impl ContactRows {
  /// Store `contact` and return the id of its row.
  fn attach(&mut self, conn: &Connection, contact: &Contact) -> Result<i64> {
    if !contact.is_unassigned() {
      if row_exists(conn, Contact::TABLE, contact.id())? {
        contact.update(conn)?;
      } else {
        contact.insert(conn)?;
      }
      return Ok(contact.id());
    }

    if let Some(row) = self.inserted.iter().find(|row| same_values(row, contact)) {
      return Ok(row.id());
    }
    let mut row = contact.clone();
    row.set_id(contact.insert(conn)?);
    let id = row.id();
    self.inserted.push(row);
    Ok(id)
  }
}

fn same_values(row: &Contact, unassigned: &Contact) -> bool {
  let mut row = row.clone();
  row.set_id(UNASSIGNED_ID);
  row == *unassigned
}

// ─── Activity ────────────────────────────────────────────────────────────────

fn insert_activity(
  conn: &Connection,
  contacts: &mut ContactRows,
  activity: &Activity,
  job_opening_id: Option<i64>,
) -> Result<i64> {
  let contact_id = contacts.attach(conn, activity.contact())?;
  conn.execute(
    "INSERT INTO activities
       (id, start, duration_ns, description, completed, contact_id, job_opening_id)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      explicit_id(activity.id()),
      encode_dt(activity.start()),
      encode_duration(activity.duration())?,
      activity.description(),
      activity.completed,
      contact_id,
      job_opening_id,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn query_activities(
  conn: &Connection,
  filter: &str,
  params: impl rusqlite::Params,
) -> Result<Vec<Activity>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {ACTIVITY_COLUMNS}
     FROM activities a JOIN contacts c ON c.id = a.contact_id
     {filter}
     ORDER BY a.id"
  ))?;
  let raws = stmt
    .query_map(params, RawActivity::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawActivity::into_activity).collect()
}

impl Record for Activity {
  const TABLE: &'static str = "activities";

  fn insert(&self, conn: &Connection) -> Result<i64> {
    insert_activity(conn, &mut ContactRows::default(), self, None)
  }

  fn update(&self, conn: &Connection) -> Result<()> {
    let contact_id = ContactRows::default().attach(conn, self.contact())?;
    conn.execute(
      "UPDATE activities
       SET start = ?2, duration_ns = ?3, description = ?4, completed = ?5, contact_id = ?6
       WHERE id = ?1",
      rusqlite::params![
        self.id(),
        encode_dt(self.start()),
        encode_duration(self.duration())?,
        self.description(),
        self.completed,
        contact_id,
      ],
    )?;
    Ok(())
  }

  fn load(conn: &Connection, id: i64) -> Result<Option<Self>> {
    Ok(query_activities(conn, "WHERE a.id = ?1", rusqlite::params![id])?.pop())
  }

  fn load_all(conn: &Connection) -> Result<Vec<Self>> {
    query_activities(conn, "", rusqlite::params![])
  }
}

// ─── JobOpening ──────────────────────────────────────────────────────────────

/// Store the opening's additional contacts and activities under `id`.
fn insert_children(conn: &Connection, opening: &JobOpening, id: i64) -> Result<()> {
  let mut contacts = ContactRows::default();
  for contact in &opening.additional_contacts {
    let contact_id = contacts.attach(conn, contact)?;
    conn.execute(
      "UPDATE contacts SET job_opening_id = ?1 WHERE id = ?2",
      rusqlite::params![id, contact_id],
    )?;
  }
  for activity in &opening.activities {
    insert_activity(conn, &mut contacts, activity, Some(id))?;
  }
  Ok(())
}

fn load_children(conn: &Connection, raw: RawJobOpening) -> Result<JobOpening> {
  let contacts =
    query_contacts(conn, "WHERE c.job_opening_id = ?1", rusqlite::params![raw.id])?;
  let activities =
    query_activities(conn, "WHERE a.job_opening_id = ?1", rusqlite::params![raw.id])?;
  raw.into_job_opening(contacts, activities)
}

impl Record for JobOpening {
  const TABLE: &'static str = "job_openings";

  fn insert(&self, conn: &Connection) -> Result<i64> {
    conn.execute(
      "INSERT INTO job_openings (id, title, organization, url, notes, advertised_date)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rusqlite::params![
        explicit_id(self.id()),
        self.title,
        self.organization,
        encode_url(self.url.as_ref()),
        self.notes,
        encode_dt(self.advertised_date),
      ],
    )?;
    let id = conn.last_insert_rowid();
    insert_children(conn, self, id)?;
    Ok(id)
  }

  /// Replaces the stored activities wholesale and re-links the contacts.
  fn update(&self, conn: &Connection) -> Result<()> {
    let id = self.id();
    conn.execute(
      "UPDATE job_openings
       SET title = ?2, organization = ?3, url = ?4, notes = ?5, advertised_date = ?6
       WHERE id = ?1",
      rusqlite::params![
        id,
        self.title,
        self.organization,
        encode_url(self.url.as_ref()),
        self.notes,
        encode_dt(self.advertised_date),
      ],
    )?;
    conn.execute(
      "DELETE FROM activities WHERE job_opening_id = ?1",
      rusqlite::params![id],
    )?;
    conn.execute(
      "UPDATE contacts SET job_opening_id = NULL WHERE job_opening_id = ?1",
      rusqlite::params![id],
    )?;
    insert_children(conn, self, id)
  }

  fn load(conn: &Connection, id: i64) -> Result<Option<Self>> {
    let raw = conn
      .query_row(
        &format!("SELECT {JOB_OPENING_COLUMNS} FROM job_openings j WHERE j.id = ?1"),
        rusqlite::params![id],
        RawJobOpening::from_row,
      )
      .optional()?;
    raw.map(|raw| load_children(conn, raw)).transpose()
  }

  fn load_all(conn: &Connection) -> Result<Vec<Self>> {
    let mut stmt = conn.prepare(&format!(
      "SELECT {JOB_OPENING_COLUMNS} FROM job_openings j ORDER BY j.id"
    ))?;
    let raws = stmt
      .query_map([], RawJobOpening::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(|raw| load_children(conn, raw)).collect()
  }
}
