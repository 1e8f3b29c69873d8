//! Seeds a fixed catalogue of HTTP monitors into an Uptime Kuma database.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod purge;
pub mod reconcile;
pub mod run;
pub mod store;
pub mod types;

pub use catalogue::Catalogue;
pub use config::SeederConfig;
pub use error::SeedError;
pub use run::{run, RunEvent, RunMode, RunReport};
