//! Polymarket best-bid bot
//!
//! Places a single good-till-cancelled limit buy one tick above the current
//! best bid of a Polymarket outcome token, never above a configured price
//! ceiling. Dry run by default.

pub mod bot;
pub mod common;
pub mod config;
pub mod polymarket;

// Re-export commonly used types
pub use bot::{decide_bid, dispatch, read_snapshot, run, BidParams, RunOutcome};
pub use common::errors::{BotError, Result};
pub use common::traits::{MarketDataSource, OrderSubmitter};
pub use common::types::{BestBidSnapshot, OrderAck, OrderIntent, PriceLevel, Side, TickSize, TimeInForce};
pub use config::types::AppConfig;
pub use polymarket::client::PolymarketClient;
pub use polymarket::rest::PolymarketRestClient;
