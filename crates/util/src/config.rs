use std::{env, fmt};

use super::database_url;

/// Number of users created when `SEED_USER_COUNT` is not set.
pub const DEFAULT_USER_COUNT: usize = 15;

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns `true` when the current environment should behave as development.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Returns the canonical name used for logging labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Knobs controlling the size and reproducibility of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub user_count: usize,
    /// Fixed seed for the random source. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let user_count = match env::var("SEED_USER_COUNT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidUserCount(value))?,
            Err(_) => DEFAULT_USER_COUNT,
        };

        let rng_seed = match env::var("SEED_RNG_SEED") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidRngSeed(value))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            user_count,
            rng_seed,
        })
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub environment: Environment,
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;
        let seed = SeedConfig::from_env()?;

        Ok(Self {
            database_url: database_url(),
            environment,
            seed,
        })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    InvalidUserCount(String),
    InvalidRngSeed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "APP_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::InvalidUserCount(value) => write!(
                f,
                "SEED_USER_COUNT must be a non-negative integer (got {value})"
            ),
            Self::InvalidRngSeed(value) => {
                write!(f, "SEED_RNG_SEED must be an unsigned 64-bit integer (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ENV_GUARD;
    use crate::DEFAULT_DATABASE_URL;

    fn clear_env() {
        for key in ["APP_ENV", "DATABASE_URL", "SEED_USER_COUNT", "SEED_RNG_SEED"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_in_development() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();

        let config = AppConfig::from_env().expect("config should load with defaults");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.seed, SeedConfig::default());
        assert_eq!(config.seed.user_count, 15);
    }

    #[test]
    fn rejects_invalid_environment() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "invalid");

        let err = AppConfig::from_env().expect_err("invalid env should error");
        assert!(matches!(err, ConfigError::InvalidEnvironment(value) if value == "invalid"));

        clear_env();
    }

    #[test]
    fn parses_seed_overrides() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "production");
        env::set_var("DATABASE_URL", "sqlite://seed.db");
        env::set_var("SEED_USER_COUNT", "40");
        env::set_var("SEED_RNG_SEED", "7");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database_url, "sqlite://seed.db");
        assert_eq!(config.seed.user_count, 40);
        assert_eq!(config.seed.rng_seed, Some(7));

        clear_env();
    }

    #[test]
    fn empty_seed_means_entropy() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("SEED_RNG_SEED", "  ");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.seed.rng_seed, None);

        clear_env();
    }

    #[test]
    fn rejects_malformed_seed_values() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("SEED_USER_COUNT", "-3");

        let err = AppConfig::from_env().expect_err("negative count should error");
        assert!(matches!(err, ConfigError::InvalidUserCount(value) if value == "-3"));

        env::remove_var("SEED_USER_COUNT");
        env::set_var("SEED_RNG_SEED", "abc");
        let err = AppConfig::from_env().expect_err("non-numeric seed should error");
        assert!(err.to_string().contains("SEED_RNG_SEED"));

        clear_env();
    }
}
