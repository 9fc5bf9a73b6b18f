//! Configuration loader

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::Result;

/// Flat environment variables the bot has always honored, mapped to their
/// configuration keys
const FLAT_ENV_VARS: &[(&str, &str)] = &[
    ("polymarket.host", "POLYMARKET_HOST"),
    ("polymarket.gamma_url", "POLYMARKET_GAMMA_URL"),
    ("polymarket.chain_id", "POLYMARKET_CHAIN_ID"),
    ("polymarket.private_key", "POLYMARKET_PRIVATE_KEY"),
    ("polymarket.funder_address", "POLYMARKET_FUNDER_ADDRESS"),
    ("polymarket.signature_type", "POLYMARKET_SIGNATURE_TYPE"),
    ("polymarket.api_key", "POLYMARKET_API_KEY"),
    ("polymarket.api_secret", "POLYMARKET_API_SECRET"),
    ("polymarket.api_passphrase", "POLYMARKET_API_PASSPHRASE"),
    ("bot.max_bid_price", "MAX_BID_PRICE"),
    ("bot.order_size", "ORDER_SIZE"),
    ("bot.dry_run", "DRY_RUN"),
];

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Flat bot variables (`POLYMARKET_PRIVATE_KEY`, `MAX_BID_PRICE`, ...)
/// 2. Environment variables prefixed with `APP__` (e.g. `APP__BOT__ORDER_SIZE`)
/// 3. Configuration file (TOML format), if it exists
/// 4. Default values
///
/// A `.env` file in the working directory is loaded first if present.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    for (key, var) in FLAT_ENV_VARS {
        let value = std::env::var(var).ok().filter(|v| !v.is_empty());
        builder = builder.set_override_option(*key, value)?;
    }

    Ok(builder.build()?.try_deserialize()?)
}

/// Parse configuration from TOML text, without consulting the environment
pub fn from_toml_str(contents: &str) -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(contents, FileFormat::Toml))
        .build()?;

    Ok(config.try_deserialize()?)
}
