use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{BallotStore, StoreError};
use crate::model::pseudonym::Pseudonym;

/// Append-only JSON-lines row file: one JSON string array per line, the
/// pseudonym first, choice fields after. This is the stand-in for the
/// original spreadsheet backend.
///
/// A mutex serialises access within the process; the column check and the
/// append happen under the same lock, which is what makes the pseudonym
/// column unique. The file is re-read on every column read, never cached.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open the row file at `path`, creating it if missing. Existing
    /// contents are parsed up front so corruption surfaces at launch
    /// rather than mid-vote.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        if store.path.exists() {
            store.read_rows()?;
        } else {
            File::create(&store.path)?;
        }
        Ok(store)
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let file = File::open(&self.path)?;
        let mut rows = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str::<Vec<String>>(&line)?);
        }
        Ok(rows)
    }
}

impl BallotStore for FileStore {
    fn read_pseudonym_column(&self) -> Result<Vec<Pseudonym>, StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        Ok(self
            .read_rows()?
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(Pseudonym::from)
            .collect())
    }

    fn append_row(&self, pseudonym: &Pseudonym, fields: &[String]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");

        // Unique-key check under the same lock as the write.
        let rows = self.read_rows()?;
        if rows
            .iter()
            .any(|row| row.first().map(String::as_str) == Some(pseudonym.as_str()))
        {
            return Err(StoreError::DuplicatePseudonym);
        }

        let mut row = Vec::with_capacity(fields.len() + 1);
        row.push(pseudonym.as_str().to_string());
        row.extend(fields.iter().cloned());
        let mut line = serde_json::to_string(&row)?;
        line.push('\n');

        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        // Only a synced write counts as a recorded ballot.
        file.sync_data()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pseudonym::pseudonymize;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("ballot-rows-{}.jsonl", rand::random::<u64>()))
    }

    #[test]
    fn starts_empty_and_creates_file() {
        let path = temp_path();
        let store = FileStore::open(&path).unwrap();
        assert!(store.read_pseudonym_column().unwrap().is_empty());
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rows_survive_reopen() {
        let path = temp_path();
        let alice = pseudonymize("alice@example.org", "s");
        let bob = pseudonymize("bob@example.org", "s");
        {
            let store = FileStore::open(&path).unwrap();
            store.append_row(&alice, &["Godkendt".to_string()]).unwrap();
            store
                .append_row(&bob, &["1".to_string(), "3".to_string(), String::new(), String::new()])
                .unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.read_pseudonym_column().unwrap(),
            vec![alice.clone(), bob]
        );
        // Uniqueness holds across reopens.
        let err = store.append_row(&alice, &["Afvist".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePseudonym));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_fails_at_open() {
        let path = temp_path();
        std::fs::write(&path, "this is not a ballot row\n").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));

        let _ = std::fs::remove_file(&path);
    }
}
