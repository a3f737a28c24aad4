//! Store-assigned player identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A player's unique identifier, assigned by the store at registration.
///
/// Ordering follows the numeric value, which is what the standings
/// tie-break relies on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Wrap a raw identifier.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The identifier the store hands out after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl FromStr for PlayerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_ordering() {
        assert!(PlayerId::new(1) < PlayerId::new(2));
        assert!(PlayerId::new(10) > PlayerId::new(9));
    }

    #[test]
    fn test_player_id_next() {
        assert_eq!(PlayerId::new(4).next(), PlayerId::new(5));
    }

    #[test]
    fn test_player_id_from_str() {
        assert_eq!(" 42 ".parse::<PlayerId>().unwrap(), PlayerId::new(42));
        assert!("abc".parse::<PlayerId>().is_err());
        assert!("-1".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_id_serializes_as_number() {
        let json = serde_json::to_string(&PlayerId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: PlayerId = serde_json::from_str("7").unwrap();
        assert_eq!(back, PlayerId::new(7));
    }

    #[test]
    fn test_player_id_display_and_debug() {
        let id = PlayerId::from(3);
        assert_eq!(format!("{}", id), "3");
        assert_eq!(format!("{:?}", id), "PlayerId(3)");
    }
}
