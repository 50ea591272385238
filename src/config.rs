// Configuration management for the trade cost simulator

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of the synthetic market the generator produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub base_price: f64,       // Center of the mid-price random walk
    pub mid_jitter: f64,       // Std dev of the per-cycle mid perturbation
    pub min_spread: f64,       // Floor of the bid-ask spread
    pub spread_jitter: f64,    // Std dev of the spread widening term
    pub levels: usize,         // Price levels per side
    pub mean_level_size: f64,  // Mean of the exponential size distribution
    pub min_level_size: f64,   // Size floor per level
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_price: 50000.0,
            mid_jitter: 50.0,
            min_spread: 5.0,
            spread_jitter: 2.0,
            levels: 10,
            mean_level_size: 5.0,
            min_level_size: 0.1,
        }
    }
}

/// Default order the session estimates costs for each cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    pub side: String,          // "buy" or "sell"
    pub quantity: f64,
    pub fee_tier: usize,       // 1-3, lower volume to higher volume
    pub volatility_pct: f64,   // Annualized volatility assumption, percent
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            side: "buy".to_string(),
            quantity: 0.1,
            fee_tier: 1,
            volatility_pct: 2.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub refresh_interval_ms: u64, // Book regeneration cadence
    pub latency_window: usize,    // Ring buffer capacity for latency samples
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 100,
            latency_window: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enable_tick_logging: bool,
    pub enable_book_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_tick_logging: true,
            enable_book_logging: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub market: MarketConfig,
    pub order: OrderConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            println!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market.base_price <= 0.0 {
            return Err(ConfigError::Validation("base_price must be positive".to_string()));
        }

        if self.market.min_spread <= 0.0 {
            return Err(ConfigError::Validation("min_spread must be positive".to_string()));
        }

        if self.market.mid_jitter < 0.0 || self.market.spread_jitter < 0.0 {
            return Err(ConfigError::Validation("jitter values must be non-negative".to_string()));
        }

        if self.market.levels == 0 {
            return Err(ConfigError::Validation("levels must be greater than 0".to_string()));
        }

        if self.market.mean_level_size <= 0.0 || self.market.min_level_size <= 0.0 {
            return Err(ConfigError::Validation("level sizes must be positive".to_string()));
        }

        if self.order.side != "buy" && self.order.side != "sell" {
            return Err(ConfigError::Validation(format!(
                "order side must be 'buy' or 'sell', got '{}'",
                self.order.side
            )));
        }

        if self.order.quantity <= 0.0 {
            return Err(ConfigError::Validation("order quantity must be positive".to_string()));
        }

        if !(1..=3).contains(&self.order.fee_tier) {
            return Err(ConfigError::Validation("fee_tier must be 1, 2 or 3".to_string()));
        }

        if self.order.volatility_pct <= 0.0 || self.order.volatility_pct > 100.0 {
            return Err(ConfigError::Validation(
                "volatility_pct must be in (0, 100]".to_string(),
            ));
        }

        if self.session.refresh_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "refresh_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.session.latency_window == 0 {
            return Err(ConfigError::Validation(
                "latency_window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_levels() {
        let mut config = Config::default();
        config.market.levels = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_fee_tier() {
        let mut config = Config::default();
        config.order.fee_tier = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_side() {
        let mut config = Config::default();
        config.order.side = "hold".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut config = Config::default();
        config.session.refresh_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
