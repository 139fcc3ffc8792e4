use thiserror::Error;

use crate::model::ContactId;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("name cannot be empty")]
    InvalidName,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("contact {0} not found")]
    NotFound(ContactId),

    #[error("invalid id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("id must be greater than zero")]
    ZeroId,

    #[error("provide at least one field to update")]
    NoUpdateFields,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("no contact ids left after {0}")]
    IdsExhausted(ContactId),

    #[error("invalid stored data: {0}")]
    InvalidData(String),

    #[error("{action}: {source}")]
    Command {
        action: &'static str,
        #[source]
        source: Box<CrmError>,
    },
}

impl CrmError {
    /// Validation and not-found errors are shown to the user as they are;
    /// everything else gets wrapped with the failing command's context.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CrmError::InvalidName | CrmError::InvalidEmail | CrmError::NotFound(_)
        )
    }

    /// Wrap with `action` unless the error is already user-facing.
    pub fn context(self, action: &'static str) -> Self {
        if self.is_user_facing() {
            self
        } else {
            CrmError::Command {
                action,
                source: Box::new(self),
            }
        }
    }
}

pub type CrmResult<T> = Result<T, CrmError>;
