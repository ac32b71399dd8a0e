use std::fmt::{self, Display, Formatter};

use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An opaque, stable stand-in for a voter's email address.
///
/// Derived as `sha256(email + salt)`, rendered as lowercase hex. The same
/// email under the same salt always yields the same pseudonym, and the email
/// is not recoverable from it. The first column of every ballot row is a
/// pseudonym, and that column is the sole double-vote guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pseudonym(String);

impl Pseudonym {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Pseudonym {
    fn from(s: String) -> Self {
        Pseudonym(s)
    }
}

impl Display for Pseudonym {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the pseudonym for `email` under the process-wide secret salt.
///
/// The email is deliberately not normalised first: the roster key is the
/// canonical spelling, and case or whitespace variants are different
/// identities as far as this function is concerned.
pub fn pseudonymize(email: &str, salt: &str) -> Pseudonym {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(salt.as_bytes());
    Pseudonym(HEXLOWER.encode(&hasher.finalize()))
}
