//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{BotError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Polymarket-specific configuration
    #[serde(default)]
    pub polymarket: PolymarketConfig,
    /// Bid placement settings
    #[serde(default)]
    pub bot: BotSettings,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Polymarket platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolymarketConfig {
    /// Base URL for the CLOB REST API
    #[serde(default = "default_polymarket_host")]
    pub host: String,
    /// Gamma API URL for market discovery
    #[serde(default = "default_polymarket_gamma_url")]
    pub gamma_url: String,
    /// EVM chain the exchange contracts live on
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Hex private key of the signing wallet (0x-prefixed)
    #[serde(default)]
    pub private_key: String,
    /// Address holding the funds (proxy wallet for signature type 1/2)
    #[serde(default)]
    pub funder_address: String,
    /// 0 = EOA, 1 = email/magic proxy, 2 = browser wallet proxy
    #[serde(default = "default_signature_type")]
    pub signature_type: u8,
    /// Pre-generated API key; derived from the wallet when absent
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// API passphrase
    #[serde(default)]
    pub api_passphrase: Option<String>,
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            host: default_polymarket_host(),
            gamma_url: default_polymarket_gamma_url(),
            chain_id: default_chain_id(),
            private_key: String::new(),
            funder_address: String::new(),
            signature_type: default_signature_type(),
            api_key: None,
            api_secret: None,
            api_passphrase: None,
        }
    }
}

impl PolymarketConfig {
    /// Complete API credentials, if all three parts are configured
    pub fn api_credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret, &self.api_passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Some(ApiCredentials::new(
                key.clone(),
                secret.clone(),
                passphrase.clone(),
            )),
            _ => None,
        }
    }
}

fn default_polymarket_host() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_polymarket_gamma_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_chain_id() -> u64 {
    137
}

fn default_signature_type() -> u8 {
    2
}

/// Bid placement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Price ceiling in dollars; no bid is ever placed above it
    #[serde(default = "default_max_bid_price", with = "rust_decimal::serde::str")]
    pub max_bid_price: Decimal,
    /// Shares per order
    #[serde(default = "default_order_size", with = "rust_decimal::serde::str")]
    pub order_size: Decimal,
    /// Only report the intended order
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            max_bid_price: default_max_bid_price(),
            order_size: default_order_size(),
            dry_run: default_dry_run(),
        }
    }
}

fn default_max_bid_price() -> Decimal {
    dec!(0.05)
}

fn default_order_size() -> Decimal {
    dec!(5)
}

fn default_dry_run() -> bool {
    true
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Command line values that take precedence over loaded configuration
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_bid_price: Option<Decimal>,
    pub order_size: Option<Decimal>,
    /// `Some(false)` is the explicit live opt-in
    pub dry_run: Option<bool>,
}

impl Overrides {
    /// Resolve the `--dry-run` / `--no-dry-run` pair.
    ///
    /// `--no-dry-run` is the explicit live opt-in and wins when both are
    /// given. With neither flag the configured value stands (`None`).
    pub fn dry_run_from_flags(dry_run: bool, no_dry_run: bool) -> Option<bool> {
        if no_dry_run {
            Some(false)
        } else if dry_run {
            Some(true)
        } else {
            None
        }
    }
}

impl AppConfig {
    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(max) = overrides.max_bid_price {
            self.bot.max_bid_price = max;
        }
        if let Some(size) = overrides.order_size {
            self.bot.order_size = size;
        }
        if let Some(dry_run) = overrides.dry_run {
            self.bot.dry_run = dry_run;
        }
        self
    }

    /// Check everything that must hold before any network activity.
    ///
    /// Every problem is reported in a single `Configuration` error.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let pm = &self.polymarket;

        if pm.private_key.is_empty() {
            errors.push("POLYMARKET_PRIVATE_KEY is not set".to_string());
        } else if !pm.private_key.starts_with("0x") {
            errors.push("POLYMARKET_PRIVATE_KEY must start with '0x'".to_string());
        }

        if pm.funder_address.is_empty() {
            errors.push("POLYMARKET_FUNDER_ADDRESS is not set".to_string());
        } else if !pm.funder_address.starts_with("0x") {
            errors.push("POLYMARKET_FUNDER_ADDRESS must start with '0x'".to_string());
        }

        if pm.signature_type > 2 {
            errors.push(format!(
                "POLYMARKET_SIGNATURE_TYPE must be 0, 1 or 2, got {}",
                pm.signature_type
            ));
        }

        for (name, value) in [("POLYMARKET_HOST", &pm.host), ("POLYMARKET_GAMMA_URL", &pm.gamma_url)] {
            if let Err(e) = url::Url::parse(value) {
                errors.push(format!("{} is not a valid URL ({}): {}", name, value, e));
            }
        }

        let cred_parts = [&pm.api_key, &pm.api_secret, &pm.api_passphrase]
            .iter()
            .filter(|part| part.is_some())
            .count();
        if cred_parts != 0 && cred_parts != 3 {
            errors.push(
                "POLYMARKET_API_KEY, POLYMARKET_API_SECRET and POLYMARKET_API_PASSPHRASE must be set together"
                    .to_string(),
            );
        }

        if self.bot.max_bid_price <= Decimal::ZERO {
            errors.push("MAX_BID_PRICE must be positive".to_string());
        }

        if self.bot.order_size <= Decimal::ZERO {
            errors.push("ORDER_SIZE must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BotError::Configuration(format!(
                "Configuration errors:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }

    /// One-line description with secrets masked, safe to log
    pub fn redacted_summary(&self) -> String {
        let key_tail = self
            .polymarket
            .private_key
            .get(self.polymarket.private_key.len().saturating_sub(4)..)
            .filter(|tail| !tail.is_empty())
            .map(|tail| format!("**********...{}", tail))
            .unwrap_or_else(|| "NOT SET".to_string());

        format!(
            "host={} chain_id={} private_key={} funder={} api_key={} max_bid_price={} order_size={} dry_run={}",
            self.polymarket.host,
            self.polymarket.chain_id,
            key_tail,
            if self.polymarket.funder_address.is_empty() {
                "NOT SET"
            } else {
                self.polymarket.funder_address.as_str()
            },
            if self.polymarket.api_key.is_some() { "configured" } else { "derived" },
            self.bot.max_bid_price,
            self.bot.order_size,
            self.bot.dry_run,
        )
    }
}

/// API credentials for authenticated requests
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub passphrase: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String, passphrase: String) -> Self {
        Self {
            api_key,
            api_secret,
            passphrase,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}
