//! Best-bid pipeline
//!
//! One invocation reads a snapshot, decides a price and dispatches at most
//! one order:
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ reader           │    │ calculator       │    │ dispatcher       │
//! │ read_snapshot()  │───▶│ decide_bid()     │───▶│ dispatch()       │
//! │ best bid + tick  │    │ pure, no I/O     │    │ dry run or live  │
//! └──────────────────┘    └──────────────────┘    └──────────────────┘
//!          │                       │ None                   │
//!   MarketDataSource               ▼                 OrderSubmitter
//!                           NoEligibleBid
//! ```
//!
//! # Components
//!
//! - [`read_snapshot`]: best bid and tick size through a [`MarketDataSource`]
//! - [`decide_bid`]: one tick above the best bid, never above the ceiling
//! - [`dispatch`]: simulated report, or a single submission through an
//!   [`OrderSubmitter`]
//! - [`run`]: the three steps in sequence
//!
//! [`MarketDataSource`]: crate::common::traits::MarketDataSource
//! [`OrderSubmitter`]: crate::common::traits::OrderSubmitter

mod calculator;
mod dispatcher;
mod reader;

pub use calculator::decide_bid;
pub use dispatcher::dispatch;
pub use reader::read_snapshot;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::common::errors::{BotError, Result};
use crate::common::traits::{MarketDataSource, OrderSubmitter};
use crate::common::types::{BestBidSnapshot, OrderAck, OrderIntent};
use crate::config::types::AppConfig;

/// Inputs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct BidParams {
    pub token_id: String,
    /// Price ceiling
    pub max_price: Decimal,
    /// Shares to order
    pub order_size: Decimal,
    pub dry_run: bool,
}

impl BidParams {
    /// Take the bid settings from validated configuration
    pub fn from_config(config: &AppConfig, token_id: impl Into<String>) -> Result<Self> {
        let params = Self {
            token_id: token_id.into(),
            max_price: config.bot.max_bid_price,
            order_size: config.bot.order_size,
            dry_run: config.bot.dry_run,
        };

        if params.token_id.trim().is_empty() {
            return Err(BotError::Configuration("token id must not be empty".to_string()));
        }
        if params.max_price <= Decimal::ZERO {
            return Err(BotError::Configuration("max price must be positive".to_string()));
        }
        if params.order_size <= Decimal::ZERO {
            return Err(BotError::Configuration("order size must be positive".to_string()));
        }
        Ok(params)
    }
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The ceiling is already reached or would be exceeded; nothing placed
    NoEligibleBid {
        snapshot: BestBidSnapshot,
        max_price: Decimal,
    },
    /// Dry run: the order that would have been placed
    Simulated { intent: OrderIntent },
    /// Live order accepted by the submitter
    Submitted { intent: OrderIntent, ack: OrderAck },
}

/// Read, decide and dispatch once
#[instrument(skip_all, fields(token_id = %params.token_id, dry_run = params.dry_run))]
pub async fn run<M, S>(params: &BidParams, market: &M, submitter: &S) -> Result<RunOutcome>
where
    M: MarketDataSource + ?Sized,
    S: OrderSubmitter + ?Sized,
{
    let snapshot = read_snapshot(market, &params.token_id).await?;

    let Some(price) = decide_bid(snapshot.best_bid, snapshot.tick_size, params.max_price) else {
        info!(
            best_bid = ?snapshot.best_bid,
            max_price = %params.max_price,
            "decision made: no eligible bid, no order placed"
        );
        return Ok(RunOutcome::NoEligibleBid {
            snapshot,
            max_price: params.max_price,
        });
    };

    info!(
        best_bid = ?snapshot.best_bid,
        tick_size = %snapshot.tick_size,
        max_price = %params.max_price,
        price = %price,
        "decision made"
    );

    let intent = OrderIntent::buy_gtc(
        snapshot.token_id,
        price,
        params.order_size,
        snapshot.tick_size,
        params.max_price,
    )?;

    match dispatch(submitter, &intent, params.dry_run).await? {
        None => Ok(RunOutcome::Simulated { intent }),
        Some(ack) => Ok(RunOutcome::Submitted { intent, ack }),
    }
}
