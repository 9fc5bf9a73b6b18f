//! Domain types shared by the reader, calculator and dispatcher

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::{BotError, Result};

/// Order side. The bot only ever bids, so this is the wire value `"BUY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
        }
    }
}

/// Order time-in-force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good-till-cancelled: rests on the book until filled or cancelled
    Gtc,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInForce::Gtc => write!(f, "GTC"),
        }
    }
}

/// A single price level in an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level (0.00 to 1.00 for prediction markets)
    pub price: Decimal,
    /// Total size/quantity at this price level
    pub size: Decimal,
}

impl PriceLevel {
    /// Create a new price level
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Minimum price increment of a market.
///
/// Always strictly positive and normalized, so `decimals()` is the number of
/// fractional digits a valid price on this market may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TickSize(Decimal);

impl TickSize {
    /// Returns `None` unless `value` is strictly positive
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value.normalize()))
        } else {
            None
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Number of fractional digits in the tick
    pub fn decimals(&self) -> u32 {
        self.0.scale()
    }

    /// Round a non-negative price down onto the tick grid.
    ///
    /// Truncates at the tick's precision first, then drops any remainder so
    /// the result is an exact multiple of the tick. Never rounds up.
    pub fn floor(&self, price: Decimal) -> Decimal {
        let truncated = price.round_dp_with_strategy(self.decimals(), RoundingStrategy::ToZero);
        let steps = (truncated / self.0).floor();
        (steps * self.0).round_dp(self.decimals())
    }

    /// True if `price` is an integer multiple of the tick
    pub fn is_aligned(&self, price: Decimal) -> bool {
        (price % self.0).is_zero()
    }
}

impl FromStr for TickSize {
    type Err = BotError;

    /// Accepts plain (`"0.001"`) and scientific (`"1e-3"`) notation
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| {
                BotError::MarketDataUnavailable(format!("unparsable tick size {:?}: {}", s, e))
            })?;

        TickSize::new(value).ok_or_else(|| {
            BotError::MarketDataUnavailable(format!("tick size must be positive, got {}", value))
        })
    }
}

impl std::fmt::Display for TickSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Best bid and tick size for one outcome token, fetched fresh each run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestBidSnapshot {
    pub token_id: String,
    /// `None` when the book has no resting bids
    pub best_bid: Option<Decimal>,
    pub tick_size: TickSize,
}

/// A GTC limit buy ready for the dispatcher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderIntent {
    pub token_id: String,
    pub side: Side,
    /// Tick-aligned limit price
    pub price: Decimal,
    /// Number of shares
    pub size: Decimal,
    pub time_in_force: TimeInForce,
    /// Tick the price is aligned to; drives amount precision when signing
    pub tick_size: TickSize,
}

impl OrderIntent {
    /// Build a GTC buy, refusing any price that is not positive, not on the
    /// tick grid, or above `max_price`.
    pub fn buy_gtc(
        token_id: impl Into<String>,
        price: Decimal,
        size: Decimal,
        tick_size: TickSize,
        max_price: Decimal,
    ) -> Result<Self> {
        if price <= Decimal::ZERO || price > max_price || !tick_size.is_aligned(price) {
            return Err(BotError::Internal(format!(
                "refusing to build order at {} (tick {}, max {})",
                price, tick_size, max_price
            )));
        }
        if size <= Decimal::ZERO {
            return Err(BotError::Internal(format!("order size must be positive, got {}", size)));
        }

        Ok(Self {
            token_id: token_id.into(),
            side: Side::Buy,
            price,
            size,
            time_in_force: TimeInForce::Gtc,
            tick_size,
        })
    }
}

/// Venue acknowledgment for a submitted order, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderAck(pub serde_json::Value);

impl OrderAck {
    /// Venue-assigned order identifier, if any
    pub fn order_id(&self) -> Option<&str> {
        self.0
            .get("orderID")
            .or_else(|| self.0.get("orderId"))
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    /// `success` flag reported by the venue; absent means success
    pub fn is_success(&self) -> bool {
        self.0.get("success").and_then(|v| v.as_bool()).unwrap_or(true)
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.0
            .get("errorMsg")
            .and_then(|v| v.as_str())
            .filter(|msg| !msg.is_empty())
    }
}

impl std::fmt::Display for OrderAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_wire_value() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""BUY""#);
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert!(serde_json::from_str::<Side>(r#""SELL""#).is_err());
    }

    #[test]
    fn test_tick_size_rejects_non_positive() {
        assert!(TickSize::new(dec!(0)).is_none());
        assert!(TickSize::new(dec!(-0.01)).is_none());
    }

    #[test]
    fn test_tick_size_normalizes_scale() {
        let tick = TickSize::new(dec!(0.0100)).unwrap();
        assert_eq!(tick.decimals(), 2);
        assert_eq!(tick.to_string(), "0.01");
    }

    #[test]
    fn test_tick_size_parsing() {
        assert_eq!("0.001".parse::<TickSize>().unwrap().value(), dec!(0.001));
        assert_eq!("1e-4".parse::<TickSize>().unwrap().value(), dec!(0.0001));
        assert!(matches!(
            "abc".parse::<TickSize>(),
            Err(BotError::MarketDataUnavailable(_))
        ));
        assert!(matches!(
            "0".parse::<TickSize>(),
            Err(BotError::MarketDataUnavailable(_))
        ));
    }

    #[test]
    fn test_floor_truncates_extra_precision() {
        let tick = TickSize::new(dec!(0.001)).unwrap();
        assert_eq!(tick.floor(dec!(0.0039999)), dec!(0.003));
        assert_eq!(tick.floor(dec!(0.003)), dec!(0.003));
    }

    #[test]
    fn test_floor_onto_non_decimal_grid() {
        let tick = TickSize::new(dec!(0.005)).unwrap();
        assert_eq!(tick.floor(dec!(0.013)), dec!(0.010));
        assert!(tick.is_aligned(tick.floor(dec!(0.013))));
    }

    #[test]
    fn test_intent_guards_invariants() {
        let tick = TickSize::new(dec!(0.01)).unwrap();
        assert!(OrderIntent::buy_gtc("t", dec!(0.03), dec!(5), tick, dec!(0.05)).is_ok());
        assert!(OrderIntent::buy_gtc("t", dec!(0.06), dec!(5), tick, dec!(0.05)).is_err());
        assert!(OrderIntent::buy_gtc("t", dec!(0.035), dec!(5), tick, dec!(0.05)).is_err());
        assert!(OrderIntent::buy_gtc("t", dec!(0), dec!(5), tick, dec!(0.05)).is_err());
        assert!(OrderIntent::buy_gtc("t", dec!(0.03), dec!(0), tick, dec!(0.05)).is_err());
    }

    #[test]
    fn test_order_ack_accessors() {
        let ack = OrderAck(serde_json::json!({
            "success": true,
            "errorMsg": "",
            "orderID": "0xabc",
            "status": "live"
        }));
        assert_eq!(ack.order_id(), Some("0xabc"));
        assert_eq!(ack.status(), Some("live"));
        assert!(ack.is_success());
        assert_eq!(ack.error_msg(), None);
    }
}
