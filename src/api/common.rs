use rocket::http::{Cookie, CookieJar};

use crate::error::{Error, Result};
use crate::model::registry::SessionRegistry;

pub const SESSION_COOKIE: &str = "ballot_session";

/// The session id from the private cookie, if the client has one.
pub fn session_id(cookies: &CookieJar<'_>) -> Result<String> {
    cookies
        .get_private(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(Error::NoSession)
}

/// Drop both the registry entry and the cookie.
pub fn end_session(cookies: &CookieJar<'_>, registry: &SessionRegistry, id: &str) {
    registry.remove(id);
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
}
