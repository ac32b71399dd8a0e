use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The trusted mapping of eligible voters to their membership codes.
///
/// Loaded once from configuration at startup, read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: HashMap<String, String>,
}

impl Roster {
    /// Exact-match credential check.
    ///
    /// Unknown email and wrong code share a single match arm and a single
    /// error value, so a caller cannot probe which emails are on the roster.
    pub fn authenticate(&self, email: &str, membership_code: &str) -> Result<()> {
        match self.members.get(email) {
            Some(expected) if expected == membership_code => Ok(()),
            _ => Err(Error::InvalidCredentials),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credentials_pass() {
        let roster = Roster::example();
        assert!(roster.authenticate("alice@example.org", "1234").is_ok());
        assert!(roster.authenticate("bob@example.org", "5678").is_ok());
    }

    #[test]
    fn wrong_code_fails() {
        let roster = Roster::example();
        let err = roster.authenticate("alice@example.org", "9999").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn unknown_email_fails() {
        let roster = Roster::example();
        let err = roster.authenticate("carol@example.org", "1234").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn unknown_email_and_wrong_code_are_indistinguishable() {
        let roster = Roster::example();
        let unknown = roster.authenticate("carol@example.org", "1234").unwrap_err();
        let wrong = roster.authenticate("alice@example.org", "0000").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn codes_match_exactly() {
        let roster = Roster::example();
        assert!(roster.authenticate("alice@example.org", "1234 ").is_err());
        assert!(roster.authenticate("alice@example.org", "123").is_err());
    }
}
