use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use serde::Deserialize;

use crate::model::{
    election::ElectionSpec,
    registry::SessionRegistry,
    roster::Roster,
    store::{FileStore, MemStore, SharedStore},
};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    election: String,
    session_ttl: u32,
    // secrets
    hash_salt: String,
    roster: Roster,
}

impl Config {
    /// Name of the election instance this process serves.
    pub fn election(&self) -> &str {
        &self.election
    }

    /// How long an abandoned session lives before being pruned.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl.into())
    }

    /// Secret salt for pseudonym derivation. Never logged, never sent.
    pub fn hash_salt(&self) -> &str {
        &self.hash_salt
    }

    /// The eligible-member roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

/// A fairing that loads the application config, validates it, resolves the
/// election instance and puts everything in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        if config.hash_salt.is_empty() {
            error!("`hash_salt` must not be empty");
            return Err(rocket);
        }
        if config.roster.is_empty() {
            error!("The roster has no members; nobody would be able to vote");
            return Err(rocket);
        }
        let election = match ElectionSpec::by_name(&config.election) {
            Some(election) => election,
            None => {
                error!("Unknown election instance {:?}", config.election);
                return Err(rocket);
            }
        };
        info!("Serving election instance {:?}", config.election);

        // Manage the state.
        rocket = rocket
            .manage(SessionRegistry::new(config.session_ttl()))
            .manage(election)
            .manage(config);
        Ok(rocket)
    }
}

/// Configuration for the ballot store backend.
#[derive(Deserialize)]
struct StoreConfig {
    ballot_file: Option<PathBuf>,
}

/// A fairing that constructs the ballot store and places a [`SharedStore`]
/// into managed state.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Ballot store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store = match config.ballot_file {
            Some(path) => match FileStore::open(&path) {
                Ok(store) => {
                    info!("Ballot rows persisted to {}", path.display());
                    SharedStore(Arc::new(store))
                }
                Err(e) => {
                    error!("Failed to open ballot file {}: {e}", path.display());
                    return Err(rocket);
                }
            },
            None => {
                warn!("No `ballot_file` configured; ballots are held in memory only");
                SharedStore(Arc::new(MemStore::new()))
            }
        };

        Ok(rocket.manage(store))
    }
}
