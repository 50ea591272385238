// Order book snapshot model
// A fresh snapshot is produced each refresh cycle and immediately superseded

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// One rung of the price ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub size: f64,
}

impl PriceLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Bid,
    Ask,
}

/// Full order book state for one refresh cycle
///
/// Bids are sorted descending by price, asks ascending; the levels are
/// immutable once generated (no incremental updates, each cycle replaces
/// the whole snapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub timestamp: DateTime<Utc>,
}

impl OrderBookSnapshot {
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            bids,
            asks,
            timestamp: Utc::now(),
        }
    }

    /// Get best bid (highest bid price)
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Get best ask (lowest ask price)
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Get bid-ask spread
    pub fn spread(&self) -> Option<f64> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Get mid price
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some((ask.price + bid.price) / 2.0),
            _ => None,
        }
    }

    /// Get order book depth (number of price levels per side)
    pub fn depth(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }

    fn side_levels(&self, side: BookSide) -> &[PriceLevel] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    /// Total size available on one side
    pub fn side_depth(&self, side: BookSide) -> f64 {
        self.side_levels(side).iter().map(|level| level.size).sum()
    }

    /// Walk one side from the best price outward, filling up to `quantity`.
    /// Returns (size-weighted average fill price, filled quantity), or None
    /// if nothing could be filled (empty side or zero quantity).
    ///
    /// When the side's total depth is less than `quantity` the walk stops
    /// at available depth and the average reflects the filled portion only;
    /// the caller can detect the shortfall from the returned quantity.
    pub fn walk(&self, side: BookSide, quantity: f64) -> Option<(f64, f64)> {
        let mut remaining = quantity;
        let mut total_value = 0.0;
        let mut total_filled = 0.0;

        for level in self.side_levels(side) {
            if remaining <= 0.0 {
                break;
            }

            let take = remaining.min(level.size);
            total_value += take * level.price;
            total_filled += take;
            remaining -= take;
        }

        if total_filled > 0.0 {
            Some((total_value / total_filled, total_filled))
        } else {
            None
        }
    }

    /// Get top N levels of each side for display
    pub fn top_levels(&self, n: usize) -> (&[PriceLevel], &[PriceLevel]) {
        (
            &self.bids[..n.min(self.bids.len())],
            &self.asks[..n.min(self.asks.len())],
        )
    }

    /// Validate order book integrity: strict per-side price ordering,
    /// positive sizes, and best bid below best ask.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid.price >= ask.price {
                return Err(SimulatorError::InvalidBook(format!(
                    "crossed book: best bid ({}) >= best ask ({})",
                    bid.price, ask.price
                )));
            }
        }

        for window in self.bids.windows(2) {
            if window[0].price <= window[1].price {
                return Err(SimulatorError::InvalidBook(format!(
                    "bids not strictly descending at {}",
                    window[1].price
                )));
            }
        }

        for window in self.asks.windows(2) {
            if window[0].price >= window[1].price {
                return Err(SimulatorError::InvalidBook(format!(
                    "asks not strictly ascending at {}",
                    window[1].price
                )));
            }
        }

        for level in self.bids.iter().chain(self.asks.iter()) {
            if level.price <= 0.0 {
                return Err(SimulatorError::InvalidBook(format!(
                    "non-positive price {}",
                    level.price
                )));
            }
            if level.size <= 0.0 {
                return Err(SimulatorError::InvalidBook(format!(
                    "non-positive size at price {}",
                    level.price
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> OrderBookSnapshot {
        OrderBookSnapshot::new(
            vec![
                PriceLevel::new(49990.0, 1.0),
                PriceLevel::new(49980.0, 2.0),
                PriceLevel::new(49970.0, 3.0),
            ],
            vec![
                PriceLevel::new(50010.0, 1.0),
                PriceLevel::new(50020.0, 2.0),
                PriceLevel::new(50030.0, 3.0),
            ],
        )
    }

    #[test]
    fn test_best_prices_and_mid() {
        let book = ladder();
        assert_eq!(book.best_bid().unwrap().price, 49990.0);
        assert_eq!(book.best_ask().unwrap().price, 50010.0);
        assert_eq!(book.mid_price(), Some(50000.0));
        assert_eq!(book.spread(), Some(20.0));
        assert_eq!(book.depth(), (3, 3));
    }

    #[test]
    fn test_empty_book_queries() {
        let book = OrderBookSnapshot::new(vec![], vec![]);
        assert!(book.best_bid().is_none());
        assert!(book.mid_price().is_none());
        assert!(book.spread().is_none());
        assert!(book.walk(BookSide::Ask, 1.0).is_none());
    }

    #[test]
    fn test_walk_within_first_level() {
        let book = ladder();
        let (avg, filled) = book.walk(BookSide::Ask, 0.5).unwrap();
        assert_eq!(avg, 50010.0);
        assert_eq!(filled, 0.5);
    }

    #[test]
    fn test_walk_spans_levels() {
        let book = ladder();
        // 1.0 @ 50010 + 0.5 @ 50020
        let (avg, filled) = book.walk(BookSide::Ask, 1.5).unwrap();
        assert_eq!(filled, 1.5);
        assert!((avg - (1.0 * 50010.0 + 0.5 * 50020.0) / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_walk_truncates_at_depth() {
        let book = ladder();
        let (avg, filled) = book.walk(BookSide::Bid, 100.0).unwrap();
        assert_eq!(filled, 6.0);
        let expected = (1.0 * 49990.0 + 2.0 * 49980.0 + 3.0 * 49970.0) / 6.0;
        assert!((avg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_validate_accepts_sorted_book() {
        assert!(ladder().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_crossed_book() {
        let book = OrderBookSnapshot::new(
            vec![PriceLevel::new(50020.0, 1.0)],
            vec![PriceLevel::new(50010.0, 1.0)],
        );
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsorted_side() {
        let book = OrderBookSnapshot::new(
            vec![PriceLevel::new(49980.0, 1.0), PriceLevel::new(49990.0, 1.0)],
            vec![PriceLevel::new(50010.0, 1.0)],
        );
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let book = OrderBookSnapshot::new(
            vec![PriceLevel::new(49990.0, 0.0)],
            vec![PriceLevel::new(50010.0, 1.0)],
        );
        assert!(book.validate().is_err());
    }
}
