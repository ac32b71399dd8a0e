//! A small voting gateway for membership organisations: roster-checked
//! login, pseudonymous identity, one immutable ballot row per identity,
//! cast through an explicit select/confirm/commit protocol.

#[macro_use]
extern crate log;
#[macro_use]
extern crate rocket;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

/// Assemble the server from the default figment (`Rocket.toml` plus
/// `ROCKET_*` environment variables).
pub fn build() -> Rocket<Build> {
    build_from(rocket::Config::figment())
}

/// Assemble the server from an explicit figment; tests inject their own.
pub fn build_from(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", api::routes())
        .attach(logging::LoggerFairing)
        .attach(config::ConfigFairing)
        .attach(config::StoreFairing)
}
