use rocket::{http::Status, response::status::Custom, response::Responder, Request};
use thiserror::Error;

use crate::model::store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while driving a voting session.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown email or wrong membership code; deliberately one error.
    #[error("Wrong email or membership code")]
    InvalidCredentials,
    /// The pseudonym already has a row in the ballot store.
    #[error("A ballot has already been cast for this identity")]
    AlreadyVoted,
    /// The selection does not fit this election's ballot shape.
    #[error("Invalid selection: {0}")]
    InvalidChoiceShape(String),
    /// The store failed to read or write; the ballot was not recorded.
    #[error("The ballot store is currently unavailable, please try again")]
    StoreUnavailable(#[source] StoreError),
    /// A transition attempted from a state that does not permit it.
    #[error("That action is not possible at this point")]
    InvalidSessionState,
    /// No live session for this client.
    #[error("No active voting session; please log in")]
    NoSession,
}

impl From<StoreError> for Error {
    /// A unique-key rejection from the store is the canonical already-voted
    /// signal; everything else is a transient store failure.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicatePseudonym => Error::AlreadyVoted,
            other => Error::StoreUnavailable(other),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = match &self {
            Error::InvalidCredentials | Error::NoSession => Status::Unauthorized,
            Error::AlreadyVoted => Status::Conflict,
            Error::InvalidChoiceShape(_) => Status::UnprocessableEntity,
            Error::StoreUnavailable(source) => {
                // The detail goes to the log; the user gets the generic message.
                error!("ballot store failure: {source}");
                Status::ServiceUnavailable
            }
            Error::InvalidSessionState => Status::InternalServerError,
        };
        Custom(status, self.to_string()).respond_to(req)
    }
}
