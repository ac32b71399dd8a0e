use std::sync::Arc;

use thiserror::Error;

use crate::model::pseudonym::Pseudonym;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemStore;

/// Append-only row persistence for committed ballots.
///
/// The first column of every row is the pseudonym, and that column read in
/// full is the authoritative set of already-voted identities.
/// Implementations enforce its uniqueness at append time, so a
/// check-then-append race between two sessions for the same identity cannot
/// produce two rows.
pub trait BallotStore: Send + Sync {
    /// Read the full pseudonym column, fresh from the backing storage.
    fn read_pseudonym_column(&self) -> Result<Vec<Pseudonym>, StoreError>;

    /// Append one ballot row, rejecting a duplicate pseudonym.
    fn append_row(&self, pseudonym: &Pseudonym, fields: &[String]) -> Result<(), StoreError>;
}

/// Failure modes of a ballot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique-key rejection: a row for this pseudonym already exists.
    #[error("a ballot row for this pseudonym already exists")]
    DuplicatePseudonym,
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed ballot row: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Has this pseudonym already participated? Always a fresh column read;
/// caching here would widen the window between check and append.
pub fn has_voted(store: &dyn BallotStore, pseudonym: &Pseudonym) -> Result<bool, StoreError> {
    Ok(store.read_pseudonym_column()?.contains(pseudonym))
}

/// Managed handle to the store backend selected at startup.
#[derive(Clone)]
pub struct SharedStore(pub Arc<dyn BallotStore>);
