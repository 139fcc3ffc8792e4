use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned contact identifier. Zero means "not yet assigned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    pub const UNSET: ContactId = ContactId(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// The identifier following this one, or `None` past `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert!(ContactId::default().is_unset());
        assert!(!ContactId::new(1).is_unset());
    }

    #[test]
    fn ids_order_numerically() {
        let mut ids = vec![ContactId::new(10), ContactId::new(2), ContactId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![ContactId::new(2), ContactId::new(7), ContactId::new(10)]);
    }

    #[test]
    fn next_stops_at_max() {
        assert_eq!(ContactId::new(41).next(), Some(ContactId::new(42)));
        assert_eq!(ContactId::new(u64::MAX).next(), None);
    }

    #[test]
    fn parse_accepts_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<ContactId>().unwrap(), ContactId::new(42));
        assert!("-1".parse::<ContactId>().is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&ContactId::new(5)).unwrap(), "5");
        let id: ContactId = serde_json::from_str("9").unwrap();
        assert_eq!(id, ContactId::new(9));
    }
}
