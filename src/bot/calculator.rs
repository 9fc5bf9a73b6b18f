//! One-tick-above bid calculation

use rust_decimal::Decimal;

use crate::common::types::TickSize;

/// Decide the price for a bid one tick above `best_bid`, capped by `max_price`.
///
/// An empty book (`None`) is treated as a best bid of zero, so the first bid
/// lands at one tick. The candidate is rounded down onto the tick grid. No bid
/// is returned when the book already sits at or above the ceiling, or when
/// the candidate itself would exceed it; a candidate exactly at the ceiling
/// is allowed.
///
/// Pure and total: every input maps to a tick-aligned price or `None`.
pub fn decide_bid(best_bid: Option<Decimal>, tick_size: TickSize, max_price: Decimal) -> Option<Decimal> {
    let best_bid = best_bid.unwrap_or(Decimal::ZERO);
    let candidate = tick_size.floor(best_bid + tick_size.value());

    if best_bid >= max_price {
        return None;
    }

    if candidate > max_price {
        return None;
    }

    Some(candidate)
}
