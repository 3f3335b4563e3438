//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Ids are stored as hyphenated lowercase strings; `favorite` as `0`/`1`.

use contacts_core::contact::{Contact, ContactId, OwnerId};
use uuid::Uuid;

use crate::Result;

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.as_uuid().hyphenated().to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(Uuid::parse_str(s)?.into()) }

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:       String,
  pub owner_id: String,
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  pub favorite: bool,
}

impl RawContact {
  /// Read a row selected with [`COLUMNS`](crate::schema::COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawContact {
      id:       row.get(0)?,
      owner_id: row.get(1)?,
      name:     row.get(2)?,
      email:    row.get(3)?,
      phone:    row.get(4)?,
      favorite: row.get(5)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:       decode_id(&self.id)?,
      owner_id: OwnerId::new(self.owner_id),
      name:     self.name,
      email:    self.email,
      phone:    self.phone,
      favorite: self.favorite,
    })
  }
}
