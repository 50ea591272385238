// Simulation session orchestrator
// Explicit scheduling loop in place of a GUI timer: each tick regenerates
// the mock book, re-estimates costs, and rolls the latency metrics forward

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::book::OrderBookSnapshot;
use crate::config::{Config, LoggingConfig};
use crate::error::{SimulatorError, SimulatorResult};
use crate::estimator::{CostEstimate, CostEstimator, FeeTier, OrderRequest};
use crate::generator::BookGenerator;
use crate::metrics::{LatencyWindow, SessionStats};

/// Everything one refresh cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub book: OrderBookSnapshot,
    pub estimate: CostEstimate,
    /// Rolling average inter-update interval, milliseconds
    pub avg_latency_ms: Option<f64>,
    /// Updates per second implied by the rolling average
    pub throughput: Option<f64>,
    /// Cosmetic maker fraction of flow, sampled per tick
    pub maker_ratio: f64,
}

/// Owns the generator, estimator, and metrics for one simulated stream
pub struct SimulationSession {
    generator: BookGenerator,
    estimator: CostEstimator,
    latency: LatencyWindow,
    stats: SessionStats,
    request: OrderRequest,
    volatility_pct: f64,
    refresh_interval: Duration,
    logging: LoggingConfig,
    rng: StdRng,
    last_update: Option<Instant>,
}

impl SimulationSession {
    /// Build a session from configuration. A seed makes the whole run
    /// (book stream and cosmetic metrics) reproducible.
    pub fn from_config(config: &Config, seed: Option<u64>) -> SimulatorResult<Self> {
        let side = config.order.side.parse().map_err(|e: String| {
            SimulatorError::InvalidParameter("order.side".to_string(), e)
        })?;

        let fee_tier = FeeTier::from_index(config.order.fee_tier).ok_or_else(|| {
            SimulatorError::InvalidParameter(
                "order.fee_tier".to_string(),
                format!("tier {} outside 1-3", config.order.fee_tier),
            )
        })?;

        let request = OrderRequest {
            side,
            quantity: config.order.quantity,
            fee_tier,
        };

        Ok(Self {
            generator: BookGenerator::new(config.market.clone(), seed)?,
            estimator: CostEstimator::default(),
            latency: LatencyWindow::new(config.session.latency_window),
            stats: SessionStats::default(),
            request,
            volatility_pct: config.order.volatility_pct,
            refresh_interval: Duration::from_millis(config.session.refresh_interval_ms),
            logging: config.logging.clone(),
            rng: StdRng::seed_from_u64(seed.map(|s| s.wrapping_add(1)).unwrap_or_else(rand::random)),
            last_update: None,
        })
    }

    /// Run one refresh cycle. Directly invocable from tests, no timer needed.
    pub fn tick(&mut self) -> SimulatorResult<TickReport> {
        let book = self.generator.generate();
        book.validate()?;

        let estimate = self.estimator.estimate(&book, &self.request, self.volatility_pct);

        let now = Instant::now();
        if let Some(last) = self.last_update {
            self.latency.push(now.duration_since(last).as_secs_f64());
        }
        self.last_update = Some(now);

        self.stats.ticks += 1;
        if estimate.is_partial_fill() {
            self.stats.partial_fills += 1;
        }
        self.stats.total_fees += estimate.fees;
        self.stats.total_slippage_cost += estimate.slippage_cost();
        self.stats.total_impact_cost += estimate.impact_cost();
        self.stats.total_cost += estimate.total_cost;
        if let Some(avg) = self.latency.average() {
            self.stats.average_latency_ms = avg * 1000.0;
        }

        let report = TickReport {
            avg_latency_ms: self.latency.average().map(|s| s * 1000.0),
            throughput: self.latency.throughput(),
            maker_ratio: self.rng.gen_range(0.3..0.7),
            book,
            estimate,
        };

        self.log_tick(&report);
        Ok(report)
    }

    /// Drive `ticks` refresh cycles at the configured interval
    pub async fn run(&mut self, ticks: u64) -> SimulatorResult<SessionStats> {
        let mut interval = tokio::time::interval(self.refresh_interval);

        info!(
            "▶️  Starting simulation: {} ticks @ {}ms",
            ticks,
            self.refresh_interval.as_millis()
        );

        for _ in 0..ticks {
            interval.tick().await;
            self.tick()?;
        }

        let stats = self.stats.clone();
        info!(
            "🏁 Simulation finished: {} ticks | fees ${:.2} | slippage ${:.2} | impact ${:.2} | total ${:.2}",
            stats.ticks,
            stats.total_fees,
            stats.total_slippage_cost,
            stats.total_impact_cost,
            stats.total_cost
        );
        if stats.partial_fills > 0 {
            warn!(
                "⚠️  {} of {} ticks could not fully fill the order",
                stats.partial_fills, stats.ticks
            );
        }

        Ok(stats)
    }

    /// One-shot estimate against a single freshly generated book
    pub fn estimate_once(&mut self) -> SimulatorResult<TickReport> {
        self.tick()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn latency(&self) -> &LatencyWindow {
        &self.latency
    }

    fn log_tick(&self, report: &TickReport) {
        if self.logging.enable_book_logging {
            let (bids, asks) = report.book.top_levels(5);
            for level in asks.iter().rev() {
                debug!("   ask {:>12.2} | {:.4}", level.price, level.size);
            }
            for level in bids {
                debug!("   bid {:>12.2} | {:.4}", level.price, level.size);
            }
        }

        if !self.logging.enable_tick_logging {
            return;
        }

        match report.estimate.slippage_pct {
            Some(slippage) => {
                debug!(
                    "📊 mid {:.2} | slippage {:.4}% | fees ${:.2} | impact {:.4}% | total ${:.2}",
                    report.estimate.mid_price.unwrap_or(0.0),
                    slippage,
                    report.estimate.fees,
                    report.estimate.impact_pct,
                    report.estimate.total_cost
                );
            }
            None => {
                debug!("📊 no liquidity on the consumed side, slippage N/A");
            }
        }

        if report.estimate.is_partial_fill() {
            warn!(
                "⚠️  partial fill: {:.4}/{:.4}",
                report.estimate.filled_quantity, report.estimate.requested_quantity
            );
        }
    }
}
