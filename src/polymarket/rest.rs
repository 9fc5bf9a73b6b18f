//! REST API client for Polymarket CLOB

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use super::auth::{generate_auth_headers, L1AuthHeaders};
use super::messages::*;
use crate::common::errors::{BotError, Result};
use crate::common::types::{OrderAck, PriceLevel};
use crate::config::types::ApiCredentials;

/// REST API client for Polymarket CLOB
#[derive(Debug, Clone)]
pub struct PolymarketRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the CLOB API
    base_url: String,
    /// Base URL for the Gamma API
    gamma_url: String,
    /// L2 credentials and the wallet address they belong to
    credentials: Option<(ApiCredentials, String)>,
}

impl PolymarketRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str, gamma_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, gamma_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, gamma_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            gamma_url: gamma_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Set API credentials for authenticated requests
    pub fn with_credentials(mut self, credentials: ApiCredentials, address: impl Into<String>) -> Self {
        self.credentials = Some((credentials, address.into()));
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // ========================================================================
    // Public Endpoints (No Authentication Required)
    // ========================================================================

    /// Get resting bid levels for a token
    ///
    /// Levels are returned in the order the venue sent them; callers must not
    /// assume the best bid comes first.
    #[instrument(skip(self))]
    pub async fn get_bids(&self, token_id: &str) -> Result<Vec<PriceLevel>> {
        let url = format!("{}/book", self.base_url);
        debug!("Fetching order book from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;
        let book: OrderBookResponse = ensure_success(response).await?.json().await?;

        // Prices and sizes arrive as decimal strings
        book.bids
            .into_iter()
            .map(|level| {
                Ok(PriceLevel {
                    price: level
                        .price
                        .parse()
                        .map_err(|e| BotError::InvalidResponse(format!("Invalid bid price: {}", e)))?,
                    size: level
                        .size
                        .parse()
                        .map_err(|e| BotError::InvalidResponse(format!("Invalid bid size: {}", e)))?,
                })
            })
            .collect()
    }

    /// Get the minimum tick size for a token as a decimal string
    #[instrument(skip(self))]
    pub async fn get_tick_size(&self, token_id: &str) -> Result<String> {
        let url = format!("{}/tick-size", self.base_url);
        debug!("Fetching tick size from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;
        let tick: TickSizeResponse = ensure_success(response).await?.json().await?;

        // Number on the live API, string through some proxies
        match tick.minimum_tick_size {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            other => Err(BotError::InvalidResponse(format!(
                "Unexpected tick size value: {}",
                other
            ))),
        }
    }

    /// Whether the token trades on the neg-risk exchange
    #[instrument(skip(self))]
    pub async fn get_neg_risk(&self, token_id: &str) -> Result<bool> {
        let url = format!("{}/neg-risk", self.base_url);
        debug!("Fetching neg-risk flag from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;
        let neg_risk: NegRiskResponse = ensure_success(response).await?.json().await?;
        Ok(neg_risk.neg_risk)
    }

    // ========================================================================
    // L1 Endpoints (Wallet Signature)
    // ========================================================================

    /// Create a new API key for the wallet
    #[instrument(skip(self, headers))]
    pub async fn create_api_key(&self, headers: &L1AuthHeaders) -> Result<ApiCredentials> {
        let url = format!("{}/auth/api-key", self.base_url);
        let response = headers.apply_to_request(self.client.post(&url)).send().await?;
        api_key_from_response(response).await
    }

    /// Derive the existing API key for the wallet
    #[instrument(skip(self, headers))]
    pub async fn derive_api_key(&self, headers: &L1AuthHeaders) -> Result<ApiCredentials> {
        let url = format!("{}/auth/derive-api-key", self.base_url);
        let response = headers.apply_to_request(self.client.get(&url)).send().await?;
        api_key_from_response(response).await
    }

    // ========================================================================
    // L2 Endpoints (API Credentials)
    // ========================================================================

    /// Post a signed order.
    ///
    /// Non-2xx responses become `Submission` with the body kept verbatim.
    #[instrument(skip(self, request), fields(token_id = %request.order.token_id))]
    pub async fn post_order(&self, request: &PostOrderRequest) -> Result<OrderAck> {
        let (credentials, address) = self.credentials.as_ref().ok_or_else(|| {
            BotError::Authentication("API credentials are required to post orders".to_string())
        })?;

        // Sign exactly the bytes that are sent
        let path = "/order";
        let body = serde_json::to_string(request)?;
        let headers = generate_auth_headers(address, credentials, "POST", path, &body)?;

        let url = format!("{}{}", self.base_url, path);
        let response = headers
            .apply_to_request(self.client.post(&url))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        // Rejections keep the venue's body for the operator
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Submission {
                status: status.as_u16(),
                body,
            });
        }

        Ok(OrderAck(response.json().await?))
    }

    // ========================================================================
    // Gamma API Endpoints (Market Discovery)
    // ========================================================================

    /// Get markets from Gamma API
    ///
    /// # Arguments
    /// * `limit` - Maximum number of markets to return
    /// * `active` - `Some(true)` restricts to open markets (`active=true&closed=false`)
    #[instrument(skip(self))]
    pub async fn get_gamma_markets(&self, limit: Option<u32>, active: Option<bool>) -> Result<Vec<GammaMarket>> {
        let url = format!("{}/markets", self.gamma_url);
        let mut params = vec![];

        if let Some(l) = limit {
            params.push(("limit", l.to_string()));
        }
        if let Some(a) = active {
            params.push(("active", a.to_string()));
            params.push(("closed", (!a).to_string()));
        }
        debug!("Fetching markets from Gamma API: {}", url);

        let response = self.client.get(&url).query(&params).send().await?;
        let markets: Vec<GammaMarket> = ensure_success(response).await?.json().await?;
        Ok(markets)
    }

    /// Get a single market by condition id.
    ///
    /// A 404 means the market does not exist and yields `Ok(None)`; any
    /// other non-2xx status is an error.
    #[instrument(skip(self))]
    pub async fn get_gamma_market(&self, condition_id: &str) -> Result<Option<GammaMarket>> {
        let url = format!("{}/markets/{}", self.gamma_url, condition_id);
        debug!("Fetching market from Gamma API: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Market not found: {}", condition_id);
            return Ok(None);
        }

        let market: GammaMarket = ensure_success(response).await?.json().await?;
        Ok(Some(market))
    }
}

/// Turn a non-2xx response into `InvalidResponse` carrying status and body
async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(BotError::InvalidResponse(format!(
        "Server returned status {}: {}",
        status, body
    )))
}

async fn api_key_from_response(response: Response) -> Result<ApiCredentials> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BotError::Authentication(format!(
            "API key request returned status {}: {}",
            status, body
        )));
    }

    let key: ApiKeyResponse = response.json().await?;
    Ok(ApiCredentials::new(key.api_key, key.secret, key.passphrase))
}
