//! Common test utilities and fixtures

#![allow(dead_code)]

use polymarket_best_bid::config::types::PolymarketConfig;
use polymarket_best_bid::config::AppConfig;
use rust_decimal::Decimal;
use std::time::Duration;

/// Well-known development key (first Anvil/Hardhat account)
pub const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// Address of `TEST_PRIVATE_KEY`, lowercase
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const TEST_FUNDER: &str = "0x00000000000000000000000000000000000000aa";

pub const TEST_API_KEY: &str = "test-api-key";
/// URL-safe base64 of "test-secret-bytes"
pub const TEST_API_SECRET: &str = "dGVzdC1zZWNyZXQtYnl0ZXM=";
pub const TEST_PASSPHRASE: &str = "test-passphrase";

pub const TOKEN_ID: &str = "71321045679252212594626385532706912750332728571942532289631379312455583992563";

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Polymarket settings pointing both APIs at a mock server
pub fn polymarket_config(server_uri: &str) -> PolymarketConfig {
    PolymarketConfig {
        host: server_uri.to_string(),
        gamma_url: server_uri.to_string(),
        private_key: TEST_PRIVATE_KEY.to_string(),
        funder_address: TEST_FUNDER.to_string(),
        ..PolymarketConfig::default()
    }
}

/// Same as `polymarket_config`, with API credentials already configured
pub fn polymarket_config_with_credentials(server_uri: &str) -> PolymarketConfig {
    PolymarketConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        api_secret: Some(TEST_API_SECRET.to_string()),
        api_passphrase: Some(TEST_PASSPHRASE.to_string()),
        ..polymarket_config(server_uri)
    }
}

/// Full application config for a pipeline run against a mock server
pub fn app_config(server_uri: &str, max_bid_price: Decimal, dry_run: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.polymarket = polymarket_config_with_credentials(server_uri);
    config.bot.max_bid_price = max_bid_price;
    config.bot.dry_run = dry_run;
    config
}

/// Sample REST responses
pub mod responses {
    use serde_json::{json, Value};

    /// Book with unsorted bids, best at 0.004
    pub fn book() -> Value {
        json!({
            "market": "0x5f65177b394277fd294cd75650044e32ba009a95022d88a0c1d565897d72f8f1",
            "asset_id": super::TOKEN_ID,
            "hash": "0xabc123",
            "timestamp": "1704067200000",
            "bids": [
                {"price": "0.001", "size": "1500"},
                {"price": "0.004", "size": "25"},
                {"price": "0.002", "size": "300"}
            ],
            "asks": [
                {"price": "0.009", "size": "80"}
            ]
        })
    }

    pub fn empty_book() -> Value {
        json!({
            "asset_id": super::TOKEN_ID,
            "bids": [],
            "asks": []
        })
    }

    pub fn tick_size(value: Value) -> Value {
        json!({ "minimum_tick_size": value })
    }

    pub fn neg_risk(flag: bool) -> Value {
        json!({ "neg_risk": flag })
    }

    pub fn api_key() -> Value {
        json!({
            "apiKey": super::TEST_API_KEY,
            "secret": super::TEST_API_SECRET,
            "passphrase": super::TEST_PASSPHRASE
        })
    }

    pub fn order_accepted() -> Value {
        json!({
            "success": true,
            "errorMsg": "",
            "orderID": "0x9f1e4a3f0cbd1dbdc33bb0fd5c8a6e5f0d2b8c7e1f3a4b5c6d7e8f9a0b1c2d3e",
            "status": "live"
        })
    }

    /// Single market from GET /markets/{id}, with numeric liquidity
    pub fn gamma_market() -> Value {
        json!({
            "id": "501",
            "question": "Will it snow in Miami in July?",
            "conditionId": "0xc1",
            "endDate": "2026-07-31T12:00:00Z",
            "volume": "15234.75",
            "liquidity": 820.5,
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"0.003\", \"0.997\"]",
            "clobTokenIds": "[\"111\", \"112\"]",
            "active": true,
            "closed": false
        })
    }

    pub fn gamma_markets() -> Value {
        json!([
            {
                "id": "501",
                "question": "Will it snow in Miami in July?",
                "conditionId": "0xc1",
                "slug": "snow-miami-july",
                "outcomes": "[\"Yes\", \"No\"]",
                "outcomePrices": "[\"0.003\", \"0.997\"]",
                "clobTokenIds": "[\"111\", \"112\"]",
                "active": true,
                "closed": false
            },
            {
                "id": "502",
                "question": "Will the launch happen on time?",
                "conditionId": "0xc2",
                "outcomes": "[\"Yes\", \"No\"]",
                "outcomePrices": "[\"0.97\", \"0.03\"]",
                "clobTokenIds": "[\"221\", \"222\"]",
                "active": true,
                "closed": false
            },
            {
                "id": "503",
                "question": "Coin flip",
                "conditionId": "0xc3",
                "outcomes": "[\"Heads\", \"Tails\"]",
                "outcomePrices": "[\"0.5\", \"0.5\"]",
                "clobTokenIds": "[\"331\", \"332\"]",
                "active": true,
                "closed": false
            }
        ])
    }
}
