use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_APPOINTMENT_MINUTES, DEFAULT_SHOP_TIMEZONE};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub remote: RemoteConfig,
    pub shop: ShopConfig,
    pub logging: LoggingConfig,
}

/// Connection details for the shop-management backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    /// IANA timezone identifier all business-hours and display-time
    /// computations are anchored to.
    pub timezone: String,
    /// Fixed appointment duration used by the booking path.
    pub appointment_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("shop.timezone", DEFAULT_SHOP_TIMEZONE)?
            .set_default("shop.appointment_minutes", i64::from(DEFAULT_APPOINTMENT_MINUTES))?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
