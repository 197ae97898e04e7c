pub mod config;

use std::env;

pub use config::{AppConfig, ConfigError, Environment, SeedConfig};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://jobpulse.db?mode=rwc";

/// Loads environment variables from `.env` when available.
///
/// Missing files are ignored so the seeder can run against a bare
/// environment in CI.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}

/// Returns the connection string of the database to seed.
///
/// The value is resolved from the `DATABASE_URL` environment variable and
/// falls back to [`DEFAULT_DATABASE_URL`] when the variable is not set.
pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}
