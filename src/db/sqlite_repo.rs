use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};

use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactId};

use super::{schema, ContactRepo};

pub const DEFAULT_DB_FILE: &str = "contacts.db";

/// SQLite-backed store using a single `contacts` table.
pub struct SqliteRepo {
    conn: Mutex<Connection>,
}

impl SqliteRepo {
    /// Opens (or creates) the database at `path`, defaulting to `contacts.db`
    /// in the current directory.
    pub fn open(path: Option<&Path>) -> CrmResult<Self> {
        let path = resolve_path(path.unwrap_or_else(|| Path::new(DEFAULT_DB_FILE)))?;
        let conn = Connection::open(&path)?;
        schema::initialize(&conn)?;
        info!("event=sqlite_open path={}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Create an in-memory database. Nothing survives the process.
    pub fn open_in_memory() -> CrmResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn resolve_path(path: &Path) -> CrmResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// SQLite rowids are signed; an ID outside that range cannot be stored.
fn sql_id(id: ContactId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

fn row_to_contact(row: &Row) -> rusqlite::Result<(i64, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn into_contact((id, name, email): (i64, String, String)) -> CrmResult<Contact> {
    let id = u64::try_from(id)
        .map_err(|_| CrmError::InvalidData(format!("negative contact id {}", id)))?;
    Ok(Contact {
        id: ContactId::new(id),
        name,
        email,
    })
}

impl ContactRepo for SqliteRepo {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn create(&self, contact: &Contact) -> CrmResult<ContactId> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO contacts (name, email) VALUES (?1, ?2)",
            params![contact.name, contact.email],
        )?;
        let rowid = conn.last_insert_rowid();
        let id = u64::try_from(rowid)
            .map_err(|_| CrmError::InvalidData(format!("negative rowid {}", rowid)))?;
        debug!("event=contact_insert backend=sqlite id={}", id);
        Ok(ContactId::new(id))
    }

    fn list(&self) -> CrmResult<Vec<Contact>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, name, email FROM contacts ORDER BY id ASC")?;

        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(into_contact)
            .collect::<CrmResult<Vec<_>>>()?;

        Ok(contacts)
    }

    fn get(&self, id: ContactId) -> CrmResult<Contact> {
        let key = sql_id(id).ok_or(CrmError::NotFound(id))?;
        let conn = self.conn.lock();
        let result = conn.query_row(
            "SELECT id, name, email FROM contacts WHERE id = ?1",
            params![key],
            row_to_contact,
        );

        match result {
            Ok(row) => into_contact(row),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(CrmError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, contact: &Contact) -> CrmResult<()> {
        if contact.id.is_unset() {
            return Err(CrmError::NotFound(contact.id));
        }
        let key = sql_id(contact.id).ok_or(CrmError::NotFound(contact.id))?;
        let affected = self.conn.lock().execute(
            "UPDATE contacts SET name = ?1, email = ?2 WHERE id = ?3",
            params![contact.name, contact.email, key],
        )?;
        if affected == 0 {
            return Err(CrmError::NotFound(contact.id));
        }
        Ok(())
    }

    fn delete(&self, id: ContactId) -> CrmResult<()> {
        let key = sql_id(id).ok_or(CrmError::NotFound(id))?;
        let affected = self
            .conn
            .lock()
            .execute("DELETE FROM contacts WHERE id = ?1", params![key])?;
        if affected == 0 {
            return Err(CrmError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_beyond_sqlite_range_are_not_found() {
        let repo = SqliteRepo::open_in_memory().unwrap();
        let id = ContactId::new(u64::MAX);
        assert!(matches!(repo.get(id), Err(CrmError::NotFound(_))));
        assert!(matches!(repo.delete(id), Err(CrmError::NotFound(_))));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = SqliteRepo::open_in_memory().unwrap();
        let first = repo
            .create(&Contact::create("Ada".into(), "ada@example.com".into()))
            .unwrap();
        repo.delete(first).unwrap();
        let second = repo
            .create(&Contact::create("Bob".into(), "bob@example.com".into()))
            .unwrap();
        assert!(second > first);
    }

    #[test]
    fn relative_paths_resolve_against_current_dir() {
        let resolved = resolve_path(Path::new("contacts.db")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("contacts.db"));
    }
}
