//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use contacts_core::{
  contact::{Contact, ContactId, ContactUpdate, OwnerId},
  store::ContactStore,
};

use crate::{
  Error, Result,
  encode::{RawContact, encode_id},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn list(&self, owner: OwnerId) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM contacts WHERE owner_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner.as_str()], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find(&self, id: ContactId, owner: OwnerId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM contacts WHERE id = ?1 AND owner_id = ?2"),
            rusqlite::params![id_str, owner.as_str()],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert(&self, contact: Contact) -> Result<Contact> {
    let id_str   = encode_id(contact.id);
    let owner    = contact.owner_id.as_str().to_owned();
    let name     = contact.name.clone();
    let email    = contact.email.clone();
    let phone    = contact.phone.clone();
    let favorite = contact.favorite;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (id, owner_id, name, email, phone, favorite)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, owner, name, email, phone, favorite],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn find_and_update(
    &self,
    id:     ContactId,
    owner:  OwnerId,
    update: ContactUpdate,
  ) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    // A single UPDATE ... RETURNING: the owner match and the write happen in
    // one statement. NULL parameters leave the column as it was.
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE contacts SET
                 name     = COALESCE(?3, name),
                 email    = COALESCE(?4, email),
                 phone    = COALESCE(?5, phone),
                 favorite = COALESCE(?6, favorite)
               WHERE id = ?1 AND owner_id = ?2
               RETURNING {COLUMNS}"
            ),
            rusqlite::params![
              id_str,
              owner.as_str(),
              update.name(),
              update.email(),
              update.phone(),
              update.favorite(),
            ],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_and_delete(&self, id: ContactId, owner: OwnerId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "DELETE FROM contacts WHERE id = ?1 AND owner_id = ?2 RETURNING {COLUMNS}"
            ),
            rusqlite::params![id_str, owner.as_str()],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
