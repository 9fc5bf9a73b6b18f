//! Market snapshot reader

use tracing::{info, instrument};

use crate::common::errors::{BotError, Result};
use crate::common::traits::MarketDataSource;
use crate::common::types::{BestBidSnapshot, TickSize};

/// Fetch the best bid and tick size for one outcome token.
///
/// An empty book is a normal state and yields `best_bid: None`. Any failure
/// to obtain the book or a usable tick size is `MarketDataUnavailable`.
#[instrument(skip(source))]
pub async fn read_snapshot<S>(source: &S, token_id: &str) -> Result<BestBidSnapshot>
where
    S: MarketDataSource + ?Sized,
{
    if token_id.trim().is_empty() {
        return Err(BotError::Configuration("token id must not be empty".to_string()));
    }

    let bids = source.get_bids(token_id).await.map_err(|e| {
        BotError::MarketDataUnavailable(format!("order book for {}: {}", token_id, e))
    })?;
    let best_bid = bids.iter().map(|level| level.price).max();

    let raw_tick = source.get_tick_size(token_id).await.map_err(|e| {
        BotError::MarketDataUnavailable(format!("tick size for {}: {}", token_id, e))
    })?;
    let tick_size: TickSize = raw_tick.parse()?;

    info!(
        best_bid = ?best_bid,
        tick_size = %tick_size,
        bid_levels = bids.len(),
        "snapshot obtained"
    );

    Ok(BestBidSnapshot {
        token_id: token_id.to_string(),
        best_bid,
        tick_size,
    })
}
