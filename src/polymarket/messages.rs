//! Polymarket CLOB and Gamma wire types

use serde::{Deserialize, Serialize};

use crate::common::types::Side;

// ============================================================================
// REST API Response Types
// ============================================================================

/// A price level in the book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: String,
    pub size: String,
}

/// Response from GET /book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookResponse {
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
}

/// Response from GET /tick-size
///
/// The venue sends a JSON number; some proxies relay it as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSizeResponse {
    pub minimum_tick_size: serde_json::Value,
}

/// Response from GET /neg-risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegRiskResponse {
    #[serde(default)]
    pub neg_risk: bool,
}

/// Response from POST /auth/api-key and GET /auth/derive-api-key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
    pub secret: String,
    pub passphrase: String,
}

// ============================================================================
// Order Submission
// ============================================================================

/// EIP-712 signed order as accepted by POST /order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    pub salt: u64,
    pub maker: String,
    pub signer: String,
    pub taker: String,
    pub token_id: String,
    pub maker_amount: String,
    pub taker_amount: String,
    pub expiration: String,
    pub nonce: String,
    pub fee_rate_bps: String,
    pub side: Side,
    pub signature_type: u8,
    pub signature: String,
}

/// Body of POST /order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOrderRequest {
    pub order: SignedOrder,
    /// API key of the order owner
    pub owner: String,
    /// Time-in-force, e.g. "GTC"
    pub order_type: String,
}

// ============================================================================
// Gamma API Response Types (Market Discovery)
// ============================================================================

/// Market from Gamma API
///
/// `outcomes`, `outcome_prices` and `clob_token_ids` are JSON arrays encoded
/// as strings, e.g. `"[\"Yes\", \"No\"]"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Lifetime volume in dollars; Gamma sends a string or a number
    #[serde(default, deserialize_with = "string_or_number")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub liquidity: Option<String>,
    #[serde(default)]
    pub outcomes: Option<String>,
    #[serde(default)]
    pub outcome_prices: Option<String>,
    #[serde(default)]
    pub clob_token_ids: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub closed: Option<bool>,
}

/// Accept `"123.4"`, `123.4` or `null` and keep the decimal text
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_order_wire_format() {
        let order = SignedOrder {
            salt: 42,
            maker: "0xmaker".to_string(),
            signer: "0xsigner".to_string(),
            taker: "0x0000000000000000000000000000000000000000".to_string(),
            token_id: "123".to_string(),
            maker_amount: "150000".to_string(),
            taker_amount: "5000000".to_string(),
            expiration: "0".to_string(),
            nonce: "0".to_string(),
            fee_rate_bps: "0".to_string(),
            side: Side::Buy,
            signature_type: 2,
            signature: "0xsig".to_string(),
        };
        let body = serde_json::to_value(PostOrderRequest {
            order,
            owner: "api-key".to_string(),
            order_type: "GTC".to_string(),
        })
        .unwrap();

        assert_eq!(body["orderType"], "GTC");
        assert_eq!(body["owner"], "api-key");
        assert_eq!(body["order"]["salt"], 42);
        assert_eq!(body["order"]["side"], "BUY");
        assert_eq!(body["order"]["tokenId"], "123");
        assert_eq!(body["order"]["makerAmount"], "150000");
        assert_eq!(body["order"]["signatureType"], 2);
    }

    #[test]
    fn test_gamma_market_parsing() {
        let market: GammaMarket = serde_json::from_str(
            r#"{
                "id": "1",
                "question": "Will it rain?",
                "conditionId": "0xc0nd",
                "outcomes": "[\"Yes\", \"No\"]",
                "outcomePrices": "[\"0.02\", \"0.98\"]",
                "clobTokenIds": "[\"111\", \"222\"]",
                "volume": "1000"
            }"#,
        )
        .unwrap();

        assert_eq!(market.condition_id.as_deref(), Some("0xc0nd"));
        assert_eq!(market.outcome_prices.as_deref(), Some("[\"0.02\", \"0.98\"]"));
        assert_eq!(market.volume.as_deref(), Some("1000"));
        assert_eq!(market.liquidity, None);
    }

    #[test]
    fn test_gamma_numeric_volume_and_liquidity() {
        let market: GammaMarket =
            serde_json::from_str(r#"{"volume": 1523.5, "liquidity": null}"#).unwrap();
        assert_eq!(market.volume.as_deref(), Some("1523.5"));
        assert_eq!(market.liquidity, None);

        let bad = serde_json::from_str::<GammaMarket>(r#"{"volume": [1]}"#);
        assert!(bad.is_err());
    }
}
