//! Storage module for database and configuration.

pub mod config;
pub mod database;
pub mod health_store;
pub mod results_store;
pub mod schema;

pub use config::{AppConfig, JobSettings};
pub use database::{Database, DatabaseError};
pub use health_store::{HealthStore, UserAccount};
pub use results_store::ResultsStore;
