//! # Config
//!
//! Define and implement config options for module

use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// seconds between two polls of the position feed
    pub position_poll_interval_seconds: u16,

    /// smallest radius the caregiver-facing control may select, in meters
    pub safe_zone_radius_min_meters: f64,

    /// largest radius the caregiver-facing control may select, in meters
    pub safe_zone_radius_max_meters: f64,

    /// step size of the caregiver-facing radius control, in meters
    pub safe_zone_radius_step_meters: f64,

    /// radius preselected when a caregiver defines a new zone, in meters
    pub safe_zone_default_radius_meters: f64,

    /// path to log configuration YAML file
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            position_poll_interval_seconds: 60,
            safe_zone_radius_min_meters: 100.0,
            safe_zone_radius_max_meters: 2000.0,
            safe_zone_radius_step_meters: 50.0,
            safe_zone_default_radius_meters: 500.0,
            log_config: String::from("log4rs.yaml"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default(
                "position_poll_interval_seconds",
                default_config.position_poll_interval_seconds,
            )?
            .set_default(
                "safe_zone_radius_min_meters",
                default_config.safe_zone_radius_min_meters,
            )?
            .set_default(
                "safe_zone_radius_max_meters",
                default_config.safe_zone_radius_max_meters,
            )?
            .set_default(
                "safe_zone_radius_step_meters",
                default_config.safe_zone_radius_step_meters,
            )?
            .set_default(
                "safe_zone_default_radius_meters",
                default_config.safe_zone_default_radius_meters,
            )?
            .set_default("log_config", default_config.log_config)?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Checks a requested radius against the caregiver-facing control range.
    ///
    /// The zone model itself accepts any positive radius; this bound belongs
    /// to the edit boundary where caregiver input is taken.
    pub fn radius_within_bounds(&self, radius_meters: f64) -> bool {
        radius_meters >= self.safe_zone_radius_min_meters
            && radius_meters <= self.safe_zone_radius_max_meters
    }
}
