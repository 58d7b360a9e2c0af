use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Hold TTL granted when a request does not ask for one.
    #[serde(default = "default_hold_minutes")]
    pub hold_minutes: i64,
    /// Flat partial payment accepted to secure a booking.
    #[serde(default = "default_confirmation_amount")]
    pub confirmation_amount: i64,
    /// How often the background sweeper reclaims expired holds.
    #[serde(default = "default_sweep_seconds")]
    pub sweep_interval_seconds: u64,
    pub currency: String,
}

fn default_hold_minutes() -> i64 {
    10
}

fn default_confirmation_amount() -> i64 {
    500
}

fn default_sweep_seconds() -> u64 {
    30
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            hold_minutes: default_hold_minutes(),
            confirmation_amount: default_confirmation_amount(),
            sweep_interval_seconds: default_sweep_seconds(),
            currency: "BDT".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("TURF").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
