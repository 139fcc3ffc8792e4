use serde::{Deserialize, Serialize};

use super::ids::ContactId;

/// A single contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
}

impl Contact {
    /// A contact that has not been stored yet. The backend assigns the ID.
    pub fn create(name: String, email: String) -> Self {
        Self {
            id: ContactId::UNSET,
            name,
            email,
        }
    }

    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = id;
        self
    }
}
