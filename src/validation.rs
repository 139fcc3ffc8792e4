use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CrmError, CrmResult};
use crate::model::ContactId;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Validates a contact name. Returns the trimmed name on success.
pub fn contact_name(value: &str) -> CrmResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CrmError::InvalidName)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validates an email address against the canonical pattern.
/// Returns the trimmed address on success.
pub fn email(value: &str) -> CrmResult<String> {
    let trimmed = value.trim();
    if is_valid_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(CrmError::InvalidEmail)
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parses a user-entered contact ID, rejecting zero.
pub fn contact_id(value: &str) -> CrmResult<ContactId> {
    let id: ContactId = value.trim().parse()?;
    if id.is_unset() {
        Err(CrmError::ZeroId)
    } else {
        Ok(id)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
