//! Authentication utilities for Polymarket API
//!
//! Two levels:
//! - L1: an EIP-712 `ClobAuth` signature from the wallet, used to create or
//!   derive API credentials.
//! - L2: HMAC-SHA256 over the request with the API secret, used for trading
//!   endpoints.

use base64::{engine::general_purpose::URL_SAFE as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::signer::OrderSigner;
use crate::common::errors::{BotError, Result};
use crate::config::types::ApiCredentials;

type HmacSha256 = Hmac<Sha256>;

/// Generate the HMAC-SHA256 signature for an L2 request
///
/// # Arguments
/// * `secret` - API secret (URL-safe base64, as issued by the CLOB)
/// * `timestamp` - Unix timestamp in seconds, sent again as `POLY_TIMESTAMP`
/// * `method` - HTTP method; case-insensitive
/// * `request_path` - Endpoint path without host, e.g. `/order`
/// * `body` - Exact request body bytes as sent (empty for GET)
///
/// Returns the URL-safe base64 signature for `POLY_SIGNATURE`.
pub fn sign_request(
    secret: &str,
    timestamp: i64,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String> {
    // The secret is URL-safe base64, not standard
    let secret_bytes = BASE64
        .decode(secret)
        .map_err(|e| BotError::Authentication(format!("Failed to decode secret: {}", e)))?;

    // Signed payload: timestamp + METHOD + path + body
    let message = format!("{}{}{}{}", timestamp, method.to_uppercase(), request_path, body);

    let mut mac = HmacSha256::new_from_slice(&secret_bytes)
        .map_err(|e| BotError::Authentication(format!("Failed to create HMAC: {}", e)))?;
    mac.update(message.as_bytes());
    let digest = mac.finalize();

    // Encode with the same URL-safe alphabet
    Ok(BASE64.encode(digest.into_bytes()))
}

/// Generate L2 authentication headers for a trading request
///
/// `address` is the signing wallet the credentials were issued to, and
/// `body` must be byte-identical to what is sent.
pub fn generate_auth_headers(
    address: &str,
    credentials: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<AuthHeaders> {
    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign_request(&credentials.api_secret, timestamp, method, request_path, body)?;

    Ok(AuthHeaders {
        address: address.to_string(),
        api_key: credentials.api_key.clone(),
        signature,
        timestamp,
        passphrase: credentials.passphrase.clone(),
    })
}

/// L2 authentication headers
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    pub address: String,
    pub api_key: String,
    pub signature: String,
    pub timestamp: i64,
    pub passphrase: String,
}

impl AuthHeaders {
    /// Add authentication headers to a reqwest RequestBuilder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("POLY_ADDRESS", &self.address)
            .header("POLY_API_KEY", &self.api_key)
            .header("POLY_SIGNATURE", &self.signature)
            .header("POLY_TIMESTAMP", self.timestamp.to_string())
            .header("POLY_PASSPHRASE", &self.passphrase)
    }
}

/// L1 authentication headers, proving control of the wallet
#[derive(Debug, Clone)]
pub struct L1AuthHeaders {
    pub address: String,
    pub signature: String,
    pub timestamp: i64,
    pub nonce: u64,
}

impl L1AuthHeaders {
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("POLY_ADDRESS", &self.address)
            .header("POLY_SIGNATURE", &self.signature)
            .header("POLY_TIMESTAMP", self.timestamp.to_string())
            .header("POLY_NONCE", self.nonce.to_string())
    }
}

/// Sign a fresh `ClobAuth` message with the wallet
pub fn generate_l1_headers(signer: &OrderSigner, nonce: u64) -> Result<L1AuthHeaders> {
    let timestamp = chrono::Utc::now().timestamp();
    let signature = signer.sign_clob_auth(timestamp, nonce)?;

    Ok(L1AuthHeaders {
        address: signer.address(),
        signature,
        timestamp,
        nonce,
    })
}
