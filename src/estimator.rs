// Trade execution cost estimation
// Slippage from a book walk, tiered taker fees, and a simplified
// Almgren-Chriss two-term market impact model

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::book::{BookSide, OrderBookSnapshot};

/// Direction of the hypothetical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The book side a taker order of this direction consumes
    pub fn consumed_side(&self) -> BookSide {
        match self {
            OrderSide::Buy => BookSide::Ask,
            OrderSide::Sell => BookSide::Bid,
        }
    }
}

impl std::str::FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(format!("unknown order side '{}'", other)),
        }
    }
}

/// Volume-based taker fee discount bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    /// < 1M USD 30-day volume
    Tier1,
    /// 1-10M USD
    Tier2,
    /// > 10M USD
    Tier3,
}

impl FeeTier {
    /// Taker fee rate for this tier (fraction, not percent)
    pub fn taker_rate(&self) -> f64 {
        match self {
            FeeTier::Tier1 => 0.001,
            FeeTier::Tier2 => 0.0007,
            FeeTier::Tier3 => 0.0005,
        }
    }

    /// Parse a 1-based tier index as used in config files
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(FeeTier::Tier1),
            2 => Some(FeeTier::Tier2),
            3 => Some(FeeTier::Tier3),
            _ => None,
        }
    }
}

/// The order whose execution cost is being estimated
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub quantity: f64,
    pub fee_tier: FeeTier,
}

/// Parameters of the two-term impact model
#[derive(Debug, Clone, Copy)]
pub struct ImpactParams {
    /// Permanent impact coefficient (volatility-driven)
    pub gamma: f64,
    /// Temporary impact coefficient (size-driven)
    pub eta: f64,
    /// Assumed execution duration in time units
    pub duration: f64,
}

impl Default for ImpactParams {
    fn default() -> Self {
        Self {
            gamma: 0.01,
            eta: 0.1,
            duration: 1.0,
        }
    }
}

/// Cost breakdown for one order against one snapshot
///
/// `slippage_pct` and `average_fill_price` are None when nothing could be
/// filled (empty side or zero quantity); currency fields are then zero
/// rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub mid_price: Option<f64>,
    pub average_fill_price: Option<f64>,
    pub requested_quantity: f64,
    pub filled_quantity: f64,
    /// Percent deviation of the average fill price from the best price on
    /// the consumed side; negative for sells walking down the bids
    pub slippage_pct: Option<f64>,
    /// Taker fee in currency
    pub fees: f64,
    /// Combined permanent + temporary impact, percent of mid
    pub impact_pct: f64,
    /// Slippage cost + fees + impact cost, in currency
    pub total_cost: f64,
}

impl CostEstimate {
    fn not_applicable(quantity: f64) -> Self {
        Self {
            mid_price: None,
            average_fill_price: None,
            requested_quantity: quantity,
            filled_quantity: 0.0,
            slippage_pct: None,
            fees: 0.0,
            impact_pct: 0.0,
            total_cost: 0.0,
        }
    }

    /// True when the book's depth could not cover the requested quantity
    pub fn is_partial_fill(&self) -> bool {
        self.filled_quantity < self.requested_quantity
    }

    fn notional(&self) -> f64 {
        self.mid_price.unwrap_or(0.0) * self.requested_quantity
    }

    /// Slippage converted to a currency amount (0 when not applicable)
    pub fn slippage_cost(&self) -> f64 {
        self.slippage_pct
            .map(|s| s / 100.0 * self.notional())
            .unwrap_or(0.0)
    }

    /// Market impact converted to a currency amount
    pub fn impact_cost(&self) -> f64 {
        self.impact_pct / 100.0 * self.notional()
    }
}

/// Stateless cost model applied to each fresh snapshot
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    impact: ImpactParams,
}

impl CostEstimator {
    pub fn new(impact: ImpactParams) -> Self {
        Self { impact }
    }

    /// Estimate execution costs for `request` against `book`.
    ///
    /// `volatility_pct` is the assumed volatility in percent (e.g. 2.5).
    /// Never errors; degenerate inputs produce "not applicable" fields.
    pub fn estimate(
        &self,
        book: &OrderBookSnapshot,
        request: &OrderRequest,
        volatility_pct: f64,
    ) -> CostEstimate {
        let mid = match book.mid_price() {
            Some(mid) => mid,
            None => return CostEstimate::not_applicable(request.quantity),
        };

        let consumed = request.side.consumed_side();
        let fill = book.walk(consumed, request.quantity);

        let slippage_pct = fill.map(|(avg_price, _)| {
            // Reference is the best price of the consumed side, not the mid
            let reference = match request.side {
                OrderSide::Buy => book.best_ask().map(|l| l.price),
                OrderSide::Sell => book.best_bid().map(|l| l.price),
            }
            .unwrap_or(avg_price);
            (avg_price - reference) / reference * 100.0
        });

        let fees = request.quantity * mid * request.fee_tier.taker_rate();

        let permanent = self.impact.gamma * request.quantity * (volatility_pct / 100.0);
        let temporary =
            self.impact.eta * request.quantity * request.quantity / (self.impact.duration * mid);
        let impact_pct = (permanent + temporary) / mid * 100.0;

        let notional = request.quantity * mid;
        let slippage_cost = slippage_pct.map(|s| s / 100.0 * notional).unwrap_or(0.0);
        let impact_cost = impact_pct / 100.0 * notional;
        let total_cost = slippage_cost + fees + impact_cost;

        CostEstimate {
            mid_price: Some(mid),
            average_fill_price: fill.map(|(avg, _)| avg),
            requested_quantity: request.quantity,
            filled_quantity: fill.map(|(_, qty)| qty).unwrap_or(0.0),
            slippage_pct,
            fees,
            impact_pct,
            total_cost,
        }
    }
}
