use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use data_encoding::HEXLOWER;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::model::session::BallotSession;

/// Live voting sessions, keyed by the opaque id handed to the client in a
/// private cookie.
///
/// Sessions past the TTL are pruned lazily whenever the registry is
/// touched; beyond that, an abandoned session needs no cleanup.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    session: BallotSession,
    created_at: DateTime<Utc>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Store a session and mint its id: 128 random bits, hex-encoded.
    pub fn insert(&self, session: BallotSession) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let id = HEXLOWER.encode(&bytes);

        let mut sessions = self.sessions.lock().expect("registry lock poisoned");
        Self::prune(&mut sessions, self.ttl);
        sessions.insert(
            id.clone(),
            Entry {
                session,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Run `f` against the live session with the given id.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut BallotSession) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.lock().expect("registry lock poisoned");
        Self::prune(&mut sessions, self.ttl);
        let entry = sessions.get_mut(id).ok_or(Error::NoSession)?;
        f(&mut entry.session)
    }

    /// Destroy a session: after a commit, or on logout/abandonment.
    pub fn remove(&self, id: &str) {
        self.sessions
            .lock()
            .expect("registry lock poisoned")
            .remove(id);
    }

    fn prune(sessions: &mut HashMap<String, Entry>, ttl: Duration) {
        let now = Utc::now();
        sessions.retain(|_, entry| now - entry.created_at < ttl);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("registry lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::ElectionSpec;

    fn session() -> BallotSession {
        BallotSession::new(ElectionSpec::accounting())
    }

    #[test]
    fn insert_access_remove() {
        let registry = SessionRegistry::new(Duration::seconds(900));
        let id = registry.insert(session());
        assert_eq!(registry.len(), 1);

        registry
            .with_session(&id, |session| {
                assert!(!session.is_committed());
                Ok(())
            })
            .unwrap();

        registry.remove(&id);
        let err = registry.with_session(&id, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::NoSession));
    }

    #[test]
    fn unknown_id_is_no_session() {
        let registry = SessionRegistry::new(Duration::seconds(900));
        let err = registry.with_session("deadbeef", |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::NoSession));
    }

    #[test]
    fn expired_sessions_are_pruned() {
        let registry = SessionRegistry::new(Duration::seconds(0));
        let id = registry.insert(session());

        let err = registry.with_session(&id, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::NoSession));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn ids_are_distinct() {
        let registry = SessionRegistry::new(Duration::seconds(900));
        let first = registry.insert(session());
        let second = registry.insert(session());
        assert_ne!(first, second);
    }
}
