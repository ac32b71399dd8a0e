use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::model::{
    choice::ChoiceShape,
    election::ElectionSpec,
    registry::SessionRegistry,
    session::BallotSession,
    store::SharedStore,
};

use super::common::{self, SESSION_COOKIE};

pub fn routes() -> Vec<Route> {
    routes![login, logout]
}

/// Credentials as submitted by the login form.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    membership_code: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    title: String,
    shape: ChoiceShape,
}

/// One login starts one voting session. The member must pass the roster
/// check and must not already have a row in the ballot store.
#[post("/login", data = "<login>", format = "json")]
async fn login(
    login: Json<LoginRequest>,
    cookies: &CookieJar<'_>,
    config: &State<Config>,
    election: &State<ElectionSpec>,
    registry: &State<SessionRegistry>,
    store: &State<SharedStore>,
) -> Result<Json<LoginResponse>> {
    // A fresh login replaces any session this client still had.
    if let Ok(previous) = common::session_id(cookies) {
        registry.remove(&previous);
    }

    let mut session = BallotSession::new(election.inner().clone());
    session.submit_credentials(
        &login.email,
        &login.membership_code,
        config.roster(),
        config.hash_salt(),
        store.0.as_ref(),
    )?;

    let id = registry.insert(session);
    cookies.add_private(
        Cookie::build((SESSION_COOKIE, id))
            .http_only(true)
            .same_site(SameSite::Strict),
    );

    Ok(Json(LoginResponse {
        title: election.title.clone(),
        shape: election.shape.clone(),
    }))
}

/// Walk away without voting. An abandoned session has no effect on the
/// ballot store.
#[post("/logout")]
async fn logout(cookies: &CookieJar<'_>, registry: &State<SessionRegistry>) {
    if let Ok(id) = common::session_id(cookies) {
        common::end_session(cookies, registry, &id);
    }
}
