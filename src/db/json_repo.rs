use log::{debug, info};
use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::CrmResult;
use crate::model::{Contact, ContactId};

use super::memory_repo::ContactTable;
use super::ContactRepo;

/// File-backed store. The whole table is kept in memory and rewritten to
/// `path` as an indented, ID-sorted JSON array after every mutation.
/// A mutation only becomes visible once the file write succeeds.
#[derive(Debug)]
pub struct JsonRepo {
    path: PathBuf,
    table: RwLock<ContactTable>,
}

impl JsonRepo {
    /// Opens the store at `path`. A missing or empty file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> CrmResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = load(&path)?;
        info!(
            "event=json_load path={} records={}",
            path.display(),
            records.len()
        );
        Ok(Self {
            path,
            table: RwLock::new(ContactTable::from_records(records)),
        })
    }

    fn persist(&self, table: &ContactTable) -> CrmResult<()> {
        let data = serde_json::to_string_pretty(&table.records())?;
        let mut file = open_for_write(&self.path)?;
        file.write_all(data.as_bytes())?;
        debug!("event=json_persist path={}", self.path.display());
        Ok(())
    }

    /// Applies `change` to a copy of the table and swaps it in after the
    /// copy has been written out.
    fn commit<T>(&self, change: impl FnOnce(&mut ContactTable) -> CrmResult<T>) -> CrmResult<T> {
        let mut table = self.table.write();
        let mut staged = table.clone();
        let value = change(&mut staged)?;
        self.persist(&staged)?;
        *table = staged;
        Ok(value)
    }
}

/// New files are created `rw-r--r--` (before the umask) on Unix.
fn open_for_write(path: &Path) -> std::io::Result<std::fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

fn load(path: &Path) -> CrmResult<Vec<Contact>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&data)?)
}

impl ContactRepo for JsonRepo {
    fn backend(&self) -> &'static str {
        "json"
    }

    fn create(&self, contact: &Contact) -> CrmResult<ContactId> {
        self.commit(|table| table.insert(contact))
    }

    fn list(&self) -> CrmResult<Vec<Contact>> {
        Ok(self.table.read().records())
    }

    fn get(&self, id: ContactId) -> CrmResult<Contact> {
        self.table.read().get(id)
    }

    fn update(&self, contact: &Contact) -> CrmResult<()> {
        self.commit(|table| table.replace(contact))
    }

    fn delete(&self, id: ContactId) -> CrmResult<()> {
        self.commit(|table| table.remove(id))
    }
}
