use crate::error::{Error, Result};
use crate::model::{
    choice::Choice,
    election::ElectionSpec,
    pseudonym::{pseudonymize, Pseudonym},
    roster::Roster,
    store::{has_voted, BallotStore},
};

/// Where a session is in the select/confirm/commit protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Unauthenticated,
    Selecting {
        pseudonym: Pseudonym,
    },
    PendingConfirmation {
        pseudonym: Pseudonym,
        choice: Choice,
    },
    Committed,
}

/// One voter's trip through the voting protocol:
/// `Unauthenticated -> Selecting -> PendingConfirmation -> Committed`,
/// with `revise` cycling back to `Selecting` any number of times.
///
/// The single row append inside `confirm` is the only external side effect
/// of the whole session. Every guard failure is a classified [`Error`], and
/// a transition attempted from the wrong state is
/// [`Error::InvalidSessionState`] (an integration fault, not user error).
#[derive(Debug)]
pub struct BallotSession {
    election: ElectionSpec,
    state: State,
}

impl BallotSession {
    pub fn new(election: ElectionSpec) -> Self {
        Self {
            election,
            state: State::Unauthenticated,
        }
    }

    pub fn election(&self) -> &ElectionSpec {
        &self.election
    }

    /// The proposed choice, if the session is awaiting confirmation.
    pub fn pending_choice(&self) -> Option<&Choice> {
        match &self.state {
            State::PendingConfirmation { choice, .. } => Some(choice),
            _ => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.state, State::Committed)
    }

    /// Validate credentials against the roster, derive the pseudonym and
    /// check it against the store's pseudonym column. On success the voter
    /// moves straight to selecting.
    ///
    /// `InvalidCredentials` leaves the session ready for another try.
    /// `AlreadyVoted` is terminal for this attempt: the caller must not
    /// offer a retry path around the guard.
    pub fn submit_credentials(
        &mut self,
        email: &str,
        membership_code: &str,
        roster: &Roster,
        salt: &str,
        store: &dyn BallotStore,
    ) -> Result<()> {
        if self.state != State::Unauthenticated {
            return Err(Error::InvalidSessionState);
        }
        roster.authenticate(email, membership_code)?;
        let pseudonym = pseudonymize(email, salt);
        if has_voted(store, &pseudonym)? {
            return Err(Error::AlreadyVoted);
        }
        self.state = State::Selecting { pseudonym };
        Ok(())
    }

    /// Propose a choice. If it fits the election's shape the session moves
    /// to `PendingConfirmation`; otherwise it stays selecting and the voter
    /// corrects and retries.
    pub fn propose_choice(&mut self, choice: Choice) -> Result<()> {
        let pseudonym = match &self.state {
            State::Selecting { pseudonym } => pseudonym.clone(),
            _ => return Err(Error::InvalidSessionState),
        };
        self.election.shape.validate(&choice)?;
        self.state = State::PendingConfirmation { pseudonym, choice };
        Ok(())
    }

    /// Discard the pending choice and go back to selecting. Allowed any
    /// number of times, with no side effects.
    pub fn revise(&mut self) -> Result<()> {
        let pseudonym = match &self.state {
            State::PendingConfirmation { pseudonym, .. } => pseudonym.clone(),
            _ => return Err(Error::InvalidSessionState),
        };
        self.state = State::Selecting { pseudonym };
        Ok(())
    }

    /// The point of no return: append `(pseudonym, choice fields)` as one
    /// row and mark the session committed.
    ///
    /// On a transient store failure the session stays in
    /// `PendingConfirmation` so `confirm` can be retried; the store's
    /// unique-key check makes the retry safe rather than a double-write.
    /// A duplicate-key rejection surfaces as `AlreadyVoted`.
    pub fn confirm(&mut self, store: &dyn BallotStore) -> Result<()> {
        let (pseudonym, choice) = match &self.state {
            State::PendingConfirmation { pseudonym, choice } => {
                (pseudonym.clone(), choice.clone())
            }
            _ => return Err(Error::InvalidSessionState),
        };
        let fields = self.election.shape.row_fields(&choice);
        store.append_row(&pseudonym, &fields)?;
        self.state = State::Committed;
        Ok(())
    }
}
