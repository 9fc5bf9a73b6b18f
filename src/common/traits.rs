//! Collaborator traits the bid pipeline depends on
//!
//! The reader and dispatcher only see these seams; `PolymarketClient`
//! implements both against the live CLOB and tests substitute mocks.

use async_trait::async_trait;

use super::errors::Result;
use super::types::{OrderAck, OrderIntent, PriceLevel};

/// Read-only order book and tick size queries for an outcome token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Resting bid levels for the token, in no particular order
    async fn get_bids(&self, token_id: &str) -> Result<Vec<PriceLevel>>;

    /// Minimum tick size as the decimal string reported by the venue
    async fn get_tick_size(&self, token_id: &str) -> Result<String>;
}

/// Signs and submits a single order
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit the order once and return the venue acknowledgment verbatim
    async fn submit_order(&self, intent: &OrderIntent) -> Result<OrderAck>;
}
