pub mod schema;
pub mod memory_repo;
pub mod json_repo;
pub mod sqlite_repo;

use log::info;

use crate::config::{StorageConfig, StorageKind};
use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactId};

pub use json_repo::JsonRepo;
pub use memory_repo::MemoryRepo;
pub use sqlite_repo::SqliteRepo;

/// Persistence contract shared by every storage backend.
///
/// All implementations behave the same from the caller's side: IDs are
/// assigned by the backend, listings come back in ascending ID order, and
/// operations on an absent ID fail with [`CrmError::NotFound`].
pub trait ContactRepo: Send + Sync {
    /// Short backend name for log lines.
    fn backend(&self) -> &'static str;

    /// Stores `contact` under a freshly assigned ID, ignoring `contact.id`.
    fn create(&self, contact: &Contact) -> CrmResult<ContactId>;

    fn list(&self) -> CrmResult<Vec<Contact>>;

    fn get(&self, id: ContactId) -> CrmResult<Contact>;

    /// Replaces name and email of the stored record with the same ID.
    fn update(&self, contact: &Contact) -> CrmResult<()>;

    fn delete(&self, id: ContactId) -> CrmResult<()>;
}

/// Opens the backend selected by `config`.
pub fn open(config: &StorageConfig) -> CrmResult<Box<dyn ContactRepo>> {
    let kind = config.kind()?;
    let repo: Box<dyn ContactRepo> = match kind {
        StorageKind::Memory => Box::new(MemoryRepo::new()),
        StorageKind::Json => {
            let path = config
                .path()
                .ok_or_else(|| CrmError::Config("json storage requires a path".into()))?;
            Box::new(JsonRepo::open(path)?)
        }
        StorageKind::Sqlite => Box::new(SqliteRepo::open(config.path())?),
    };
    info!("event=storage_open backend={} status=ok", kind);
    Ok(repo)
}
