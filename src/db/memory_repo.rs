use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactId};

use super::ContactRepo;

/// ID-ordered contact table with a running ID counter.
///
/// Shared by the memory and JSON backends; callers provide the locking.
/// `next_id` is `None` once the ID space is used up.
#[derive(Debug, Clone)]
pub(crate) struct ContactTable {
    contacts: BTreeMap<ContactId, Contact>,
    next_id: Option<ContactId>,
}

impl Default for ContactTable {
    fn default() -> Self {
        Self {
            contacts: BTreeMap::new(),
            next_id: Some(ContactId::new(1)),
        }
    }
}

impl ContactTable {
    /// Builds a table from previously stored records. The counter resumes
    /// after the highest loaded ID.
    pub(crate) fn from_records(records: Vec<Contact>) -> Self {
        let mut table = Self::default();
        for contact in records {
            if table.next_id.is_some_and(|next| contact.id >= next) {
                table.next_id = contact.id.next();
            }
            table.contacts.insert(contact.id, contact);
        }
        table
    }

    /// Stores a copy of `contact` under the next free ID. The counter stays
    /// above every stored ID, so an existing record is never replaced.
    pub(crate) fn insert(&mut self, contact: &Contact) -> CrmResult<ContactId> {
        let last = self.contacts.keys().next_back().copied().unwrap_or_default();
        let id = self.next_id.ok_or(CrmError::IdsExhausted(last))?;
        self.next_id = id.next();
        self.contacts.insert(id, contact.clone().with_id(id));
        Ok(id)
    }

    pub(crate) fn records(&self) -> Vec<Contact> {
        self.contacts.values().cloned().collect()
    }

    pub(crate) fn get(&self, id: ContactId) -> CrmResult<Contact> {
        self.contacts
            .get(&id)
            .cloned()
            .ok_or(CrmError::NotFound(id))
    }

    pub(crate) fn replace(&mut self, contact: &Contact) -> CrmResult<()> {
        match self.contacts.get_mut(&contact.id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(())
            }
            None => Err(CrmError::NotFound(contact.id)),
        }
    }

    pub(crate) fn remove(&mut self, id: ContactId) -> CrmResult<()> {
        self.contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(CrmError::NotFound(id))
    }

    #[cfg(test)]
    pub(crate) fn next_id(&self) -> Option<ContactId> {
        self.next_id
    }
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    table: RwLock<ContactTable>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactRepo for MemoryRepo {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn create(&self, contact: &Contact) -> CrmResult<ContactId> {
        let id = self.table.write().insert(contact)?;
        debug!("event=contact_insert backend=memory id={}", id);
        Ok(id)
    }

    fn list(&self) -> CrmResult<Vec<Contact>> {
        Ok(self.table.read().records())
    }

    fn get(&self, id: ContactId) -> CrmResult<Contact> {
        self.table.read().get(id)
    }

    fn update(&self, contact: &Contact) -> CrmResult<()> {
        self.table.write().replace(contact)
    }

    fn delete(&self, id: ContactId) -> CrmResult<()> {
        self.table.write().remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, id: u64) -> Contact {
        Contact::create(name.into(), format!("{}@example.com", name.to_lowercase()))
            .with_id(ContactId::new(id))
    }

    #[test]
    fn empty_table_starts_at_one() {
        assert_eq!(ContactTable::default().next_id(), Some(ContactId::new(1)));
    }

    #[test]
    fn from_records_resumes_after_max_id() {
        let table = ContactTable::from_records(vec![contact("Bo", 4), contact("Al", 9), contact("Cy", 2)]);
        assert_eq!(table.next_id(), Some(ContactId::new(10)));
        let ids: Vec<u64> = table.records().iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![2, 4, 9]);
    }

    #[test]
    fn insert_ignores_caller_id() {
        let mut table = ContactTable::default();
        let id = table.insert(&contact("Al", 77)).unwrap();
        assert_eq!(id, ContactId::new(1));
        assert!(matches!(table.get(ContactId::new(77)), Err(CrmError::NotFound(_))));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut table = ContactTable::default();
        let first = table.insert(&contact("Al", 0)).unwrap();
        table.remove(first).unwrap();
        let second = table.insert(&contact("Bo", 0)).unwrap();
        assert_eq!(second, ContactId::new(2));
    }

    #[test]
    fn replace_unset_id_is_not_found() {
        let mut table = ContactTable::default();
        table.insert(&contact("Al", 0)).unwrap();
        let err = table.replace(&contact("Al", 0)).unwrap_err();
        assert!(matches!(err, CrmError::NotFound(id) if id.is_unset()));
    }

    #[test]
    fn insert_after_max_id_keeps_existing_record() {
        let mut table = ContactTable::from_records(vec![contact("Max", u64::MAX)]);
        assert_eq!(table.next_id(), None);

        let err = table.insert(&contact("New", 0)).unwrap_err();
        assert!(matches!(err, CrmError::IdsExhausted(id) if id.value() == u64::MAX));

        let records = table.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Max");
    }

    #[test]
    fn memory_create_propagates_exhaustion() {
        let repo = MemoryRepo {
            table: RwLock::new(ContactTable::from_records(vec![contact("Max", u64::MAX)])),
        };
        assert!(repo.create(&contact("New", 0)).is_err());
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
