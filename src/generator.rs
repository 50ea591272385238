// Synthetic order book generation
// Stands in for a live market data feed: each call produces a fresh,
// sorted snapshot around a randomly perturbed mid price

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use crate::book::{OrderBookSnapshot, PriceLevel};
use crate::config::MarketConfig;
use crate::error::{SimulatorError, SimulatorResult};

/// Mock market data source
///
/// Seeded construction gives reproducible streams for tests and demo runs.
pub struct BookGenerator {
    config: MarketConfig,
    mid_dist: Normal<f64>,
    spread_dist: Normal<f64>,
    size_dist: Exp<f64>,
    rng: StdRng,
}

impl BookGenerator {
    pub fn new(config: MarketConfig, seed: Option<u64>) -> SimulatorResult<Self> {
        let mid_dist = Normal::new(0.0, config.mid_jitter).map_err(|e| {
            SimulatorError::InvalidParameter("mid_jitter".to_string(), e.to_string())
        })?;
        let spread_dist = Normal::new(0.0, config.spread_jitter).map_err(|e| {
            SimulatorError::InvalidParameter("spread_jitter".to_string(), e.to_string())
        })?;
        let size_dist = Exp::new(1.0 / config.mean_level_size).map_err(|e| {
            SimulatorError::InvalidParameter("mean_level_size".to_string(), e.to_string())
        })?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            mid_dist,
            spread_dist,
            size_dist,
            rng,
        })
    }

    /// Generate the next snapshot
    pub fn generate(&mut self) -> OrderBookSnapshot {
        let mid = self.config.base_price + self.mid_dist.sample(&mut self.rng);
        let spread = self.config.min_spread + self.spread_dist.sample(&mut self.rng).abs();

        let mut bids = Vec::with_capacity(self.config.levels);
        let mut asks = Vec::with_capacity(self.config.levels);

        for i in 0..self.config.levels {
            let offset = i as f64 * spread / 2.0;

            let bid_price = mid - offset - self.rng.gen_range(0.0..spread / 4.0);
            bids.push(PriceLevel::new(bid_price, self.next_size()));

            let ask_price = mid + offset + self.rng.gen_range(0.0..spread / 4.0);
            asks.push(PriceLevel::new(ask_price, self.next_size()));
        }

        // Per-level jitter can reorder neighbours; restore ladder ordering
        bids.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));
        asks.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));

        OrderBookSnapshot::new(bids, asks)
    }

    fn next_size(&mut self) -> f64 {
        self.size_dist
            .sample(&mut self.rng)
            .max(self.config.min_level_size)
    }
}
