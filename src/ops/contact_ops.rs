use log::{debug, info};

use crate::db::ContactRepo;
use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactId};
use crate::validation::{self, trim_optional};

/// Validation and orchestration in front of a storage backend.
pub struct ContactService {
    repo: Box<dyn ContactRepo>,
}

impl ContactService {
    pub fn new(repo: Box<dyn ContactRepo>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    /// Validates and stores a new contact, returning it with its assigned ID.
    pub fn add_contact(&self, name: &str, email: &str) -> CrmResult<Contact> {
        let name = validation::contact_name(name).inspect_err(|_| {
            debug!("event=contact_rejected reason=invalid_name");
        })?;
        let email = validation::email(email).inspect_err(|_| {
            debug!("event=contact_rejected reason=invalid_email");
        })?;

        let contact = Contact::create(name, email);
        let id = self.repo.create(&contact)?;
        info!(
            "event=contact_create backend={} id={}",
            self.backend(),
            id
        );
        Ok(contact.with_id(id))
    }

    pub fn list_contacts(&self) -> CrmResult<Vec<Contact>> {
        self.repo.list()
    }

    pub fn get_contact(&self, id: ContactId) -> CrmResult<Contact> {
        self.repo.get(id)
    }

    /// Overwrites only the fields given as non-blank input. A new email is
    /// validated before anything is written.
    pub fn update_contact(&self, id: ContactId, name: &str, email: &str) -> CrmResult<Contact> {
        let mut contact = self.repo.get(id)?;

        if let Some(name) = trim_optional(Some(name)) {
            contact.name = name;
        }
        if let Some(email) = trim_optional(Some(email)) {
            contact.email = validation::email(&email)?;
        }
        if contact.name.trim().is_empty() {
            return Err(CrmError::InvalidName);
        }

        self.repo.update(&contact)?;
        info!(
            "event=contact_update backend={} id={}",
            self.backend(),
            id
        );
        Ok(contact)
    }

    pub fn delete_contact(&self, id: ContactId) -> CrmResult<()> {
        self.repo.delete(id)?;
        info!(
            "event=contact_delete backend={} id={}",
            self.backend(),
            id
        );
        Ok(())
    }
}
