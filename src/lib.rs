// Trade Cost Simulator Library
//
// Estimates trade execution costs (slippage, fees, market impact) against
// synthetically generated order book snapshots

pub mod book;
pub mod config;      // TOML configuration layer
pub mod error;       // Unified error handling
pub mod estimator;   // Cost model
pub mod generator;   // Mock market data
pub mod metrics;     // Latency window + run statistics
pub mod session;     // Scheduling loop

// Re-export the order book model
pub use book::{BookSide, OrderBookSnapshot, PriceLevel};

// Re-export error types
pub use error::{SimulatorError, SimulatorResult};

// Re-export configuration
pub use config::{Config, ConfigError, LoggingConfig, MarketConfig, OrderConfig, SessionConfig};

// Re-export the cost model
pub use estimator::{
    CostEstimate, CostEstimator, FeeTier, ImpactParams, OrderRequest, OrderSide,
};

// Re-export generation and session components
pub use generator::BookGenerator;
pub use metrics::{LatencyWindow, SessionStats};
pub use session::{SimulationSession, TickReport};
