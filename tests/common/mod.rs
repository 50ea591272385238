// Common test utilities and helpers

use trade_simulator::{
    Config, FeeTier, OrderBookSnapshot, OrderRequest, OrderSide, PriceLevel,
};

/// Create a test configuration with logging silenced
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.logging.enable_tick_logging = false;
    config.logging.enable_book_logging = false;
    config
}

/// Reference book from the cost-model acceptance scenarios:
/// best bid 49990, best ask 50010, mid 50000, one unit per level
pub fn reference_book() -> OrderBookSnapshot {
    OrderBookSnapshot::new(
        vec![
            PriceLevel::new(49990.0, 1.0),
            PriceLevel::new(49980.0, 1.0),
            PriceLevel::new(49970.0, 1.0),
        ],
        vec![
            PriceLevel::new(50010.0, 1.0),
            PriceLevel::new(50020.0, 1.0),
            PriceLevel::new(50030.0, 1.0),
        ],
    )
}

pub fn buy_order(quantity: f64, fee_tier: FeeTier) -> OrderRequest {
    OrderRequest {
        side: OrderSide::Buy,
        quantity,
        fee_tier,
    }
}

#[allow(dead_code)]
pub fn sell_order(quantity: f64, fee_tier: FeeTier) -> OrderRequest {
    OrderRequest {
        side: OrderSide::Sell,
        quantity,
        fee_tier,
    }
}
