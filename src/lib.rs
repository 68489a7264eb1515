// Library exports for the wargame search engine
// The binaries and integration tests use the core through these modules

pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod game_log;
pub mod game_runner;
pub mod game_state;
pub mod loader;
pub mod moves;
pub mod search;
pub mod types;

pub use error::{Result, WargameError};
