use std::sync::Mutex;

use super::{BallotStore, StoreError};
use crate::model::pseudonym::Pseudonym;

/// In-memory ballot store. Rows vanish on restart, so this backend is for
/// tests and local trials only; the launch log says so loudly.
#[derive(Debug, Default)]
pub struct MemStore {
    rows: Mutex<Vec<(Pseudonym, Vec<String>)>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows, in append order.
    pub fn rows(&self) -> Vec<(Pseudonym, Vec<String>)> {
        self.rows.lock().expect("store lock poisoned").clone()
    }
}

impl BallotStore for MemStore {
    fn read_pseudonym_column(&self) -> Result<Vec<Pseudonym>, StoreError> {
        let rows = self.rows.lock().expect("store lock poisoned");
        Ok(rows.iter().map(|(pseudonym, _)| pseudonym.clone()).collect())
    }

    fn append_row(&self, pseudonym: &Pseudonym, fields: &[String]) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("store lock poisoned");
        if rows.iter().any(|(existing, _)| existing == pseudonym) {
            return Err(StoreError::DuplicatePseudonym);
        }
        rows.push((pseudonym.clone(), fields.to_vec()));
        Ok(())
    }
}
