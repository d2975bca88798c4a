//! API configuration

use std::time::Duration;

use serde::Deserialize;

use domain_claims::SchedulerConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
    /// Seconds between lifecycle scheduler ticks
    pub scheduler_interval_secs: u64,
    /// Chance per tick that an UNDER_REVIEW claim advances
    pub auto_advance_probability: f64,
    /// Load the demonstration claims at startup
    pub seed_demo_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            log_json: false,
            scheduler_interval_secs: 15,
            auto_advance_probability: 0.2,
            seed_demo_data: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables keep their default values.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let config: Self = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("scheduler_interval_secs", defaults.scheduler_interval_secs as i64)?
            .set_default("auto_advance_probability", defaults.auto_advance_probability)?
            .set_default("seed_demo_data", defaults.seed_demo_data)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the server cannot run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.scheduler_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "scheduler_interval_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.auto_advance_probability) {
            return Err(config::ConfigError::Message(format!(
                "auto_advance_probability must be between 0 and 1, got {}",
                self.auto_advance_probability
            )));
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(config::ConfigError::Message("jwt_secret must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the lifecycle scheduler
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: Duration::from_secs(self.scheduler_interval_secs),
            advance_probability: self.auto_advance_probability,
        }
    }
}
