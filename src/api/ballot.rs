use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{
    choice::Choice,
    election::ElectionSpec,
    registry::SessionRegistry,
    store::SharedStore,
};

use super::common;

pub fn routes() -> Vec<Route> {
    routes![describe_election, select, revise, confirm]
}

/// What this instance is voting on and what a valid ballot looks like.
#[get("/election")]
async fn describe_election(election: &State<ElectionSpec>) -> Json<ElectionSpec> {
    Json(election.inner().clone())
}

#[derive(Debug, Serialize)]
struct PendingResponse {
    pending: Choice,
    message: &'static str,
}

/// Propose a choice. It is held for confirmation; nothing is stored yet.
#[post("/ballot/select", data = "<choice>", format = "json")]
async fn select(
    choice: Json<Choice>,
    cookies: &CookieJar<'_>,
    registry: &State<SessionRegistry>,
) -> Result<Json<PendingResponse>> {
    let id = common::session_id(cookies)?;
    let choice = choice.into_inner();
    let echo = choice.clone();
    registry.with_session(&id, |session| session.propose_choice(choice))?;
    Ok(Json(PendingResponse {
        pending: echo,
        message: "Confirm to cast your ballot; it cannot be changed afterwards.",
    }))
}

/// Discard the pending choice and select again.
#[post("/ballot/revise")]
async fn revise(cookies: &CookieJar<'_>, registry: &State<SessionRegistry>) -> Result<()> {
    let id = common::session_id(cookies)?;
    registry.with_session(&id, |session| session.revise())
}

#[derive(Debug, Serialize)]
struct CommittedResponse {
    message: &'static str,
}

/// The point of no return: append the ballot row and end the session.
#[post("/ballot/confirm")]
async fn confirm(
    cookies: &CookieJar<'_>,
    registry: &State<SessionRegistry>,
    store: &State<SharedStore>,
) -> Result<Json<CommittedResponse>> {
    let id = common::session_id(cookies)?;
    match registry.with_session(&id, |session| session.confirm(store.0.as_ref())) {
        Ok(()) => {
            common::end_session(cookies, registry, &id);
            Ok(Json(CommittedResponse {
                message: "Your ballot has been received. Thank you for voting!",
            }))
        }
        // A row for this identity landed since login; the session is done
        // either way.
        Err(Error::AlreadyVoted) => {
            common::end_session(cookies, registry, &id);
            Err(Error::AlreadyVoted)
        }
        // Transient store failures leave the session pending so the voter
        // can confirm again.
        Err(err) => Err(err),
    }
}
