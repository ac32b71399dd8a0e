pub mod choice;
pub mod election;
pub mod pseudonym;
pub mod registry;
pub mod roster;
pub mod session;
pub mod store;
