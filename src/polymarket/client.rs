//! Main Polymarket client combining REST access, signing and credentials

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::auth::generate_l1_headers;
use super::messages::PostOrderRequest;
use super::rest::PolymarketRestClient;
use super::signer::OrderSigner;
use crate::common::errors::{BotError, Result};
use crate::common::traits::{MarketDataSource, OrderSubmitter};
use crate::common::types::{OrderAck, OrderIntent, PriceLevel};
use crate::config::types::{ApiCredentials, PolymarketConfig};

/// Combined Polymarket client for market data and order submission
pub struct PolymarketClient {
    /// REST API client
    rest_client: PolymarketRestClient,
    /// Wallet signer for orders and L1 auth
    signer: OrderSigner,
    /// API credentials, configured or derived
    credentials: Option<ApiCredentials>,
}

impl PolymarketClient {
    /// Create a new Polymarket client from configuration
    pub fn new(config: &PolymarketConfig, timeout: Duration) -> Result<Self> {
        let rest_client = PolymarketRestClient::with_timeout(&config.host, &config.gamma_url, timeout)?;
        let signer = OrderSigner::new(
            &config.private_key,
            &config.funder_address,
            config.signature_type,
            config.chain_id,
        )?;

        let mut client = Self {
            rest_client,
            signer,
            credentials: None,
        };
        if let Some(credentials) = config.api_credentials() {
            client.set_credentials(credentials);
        }
        Ok(client)
    }

    /// Get a reference to the REST client
    pub fn rest(&self) -> &PolymarketRestClient {
        &self.rest_client
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Make sure API credentials are available for trading.
    ///
    /// Configured credentials are used as-is. Otherwise a key is created for
    /// the wallet, falling back to deriving the existing one.
    #[instrument(skip(self), fields(address = %self.signer.address()))]
    pub async fn authenticate(&mut self) -> Result<()> {
        if self.is_authenticated() {
            info!("Using configured API credentials");
            return Ok(());
        }

        let headers = generate_l1_headers(&self.signer, 0)?;
        let credentials = match self.rest_client.create_api_key(&headers).await {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "API key creation failed, deriving existing key");
                let headers = generate_l1_headers(&self.signer, 0)?;
                self.rest_client.derive_api_key(&headers).await?
            }
        };

        info!(api_key = %credentials.api_key, "Authentication successful");
        self.set_credentials(credentials);
        Ok(())
    }

    fn set_credentials(&mut self, credentials: ApiCredentials) {
        self.rest_client = self
            .rest_client
            .clone()
            .with_credentials(credentials.clone(), self.signer.address());
        self.credentials = Some(credentials);
    }
}

#[async_trait]
impl MarketDataSource for PolymarketClient {
    async fn get_bids(&self, token_id: &str) -> Result<Vec<PriceLevel>> {
        self.rest_client.get_bids(token_id).await
    }

    async fn get_tick_size(&self, token_id: &str) -> Result<String> {
        self.rest_client.get_tick_size(token_id).await
    }
}

#[async_trait]
impl OrderSubmitter for PolymarketClient {
    async fn submit_order(&self, intent: &OrderIntent) -> Result<OrderAck> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            BotError::Authentication("not authenticated; call authenticate() first".to_string())
        })?;

        let neg_risk = self.rest_client.get_neg_risk(&intent.token_id).await?;
        info!(neg_risk, "Signing order");
        let order = self.signer.sign_order(intent, neg_risk)?;

        let request = PostOrderRequest {
            order,
            owner: credentials.api_key.clone(),
            order_type: intent.time_in_force.to_string(),
        };

        info!("Submitting order");
        self.rest_client.post_order(&request).await
    }
}
