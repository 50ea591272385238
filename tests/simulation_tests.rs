// End-to-end tests for the generator, metrics window, and session loop

mod common;

use common::create_test_config;
use trade_simulator::{BookGenerator, LatencyWindow, MarketConfig, SimulationSession};

#[test]
fn test_generator_honors_config_shape() {
    let mut market = MarketConfig::default();
    market.levels = 4;
    market.base_price = 2000.0;
    market.mid_jitter = 1.0;
    market.min_spread = 0.5;

    let mut generator = BookGenerator::new(market, Some(1)).unwrap();
    let book = generator.generate();

    assert_eq!(book.depth(), (4, 4));
    assert!(book.validate().is_ok());
    let mid = book.mid_price().unwrap();
    assert!((mid - 2000.0).abs() < 50.0);
}

#[test]
fn test_generator_ordering_invariant_over_many_cycles() {
    let mut generator = BookGenerator::new(MarketConfig::default(), Some(8)).unwrap();

    for _ in 0..200 {
        let book = generator.generate();
        for window in book.bids.windows(2) {
            assert!(window[0].price > window[1].price);
        }
        for window in book.asks.windows(2) {
            assert!(window[0].price < window[1].price);
        }
        assert!(book.best_bid().unwrap().price < book.best_ask().unwrap().price);
    }
}

#[test]
fn test_latency_window_ring_semantics() {
    let mut window = LatencyWindow::new(100);
    for i in 0..250 {
        window.push(i as f64);
    }

    // Capacity bounds the buffer; only the last 100 samples survive
    assert_eq!(window.len(), 100);
    assert_eq!(window.capacity(), 100);
    let avg = window.average().unwrap();
    assert!((avg - (150.0 + 249.0) / 2.0).abs() < 1e-9);
}

#[test]
fn test_session_accumulates_costs() {
    let config = create_test_config();
    let mut session = SimulationSession::from_config(&config, Some(21)).unwrap();

    for _ in 0..10 {
        session.tick().unwrap();
    }

    let stats = session.stats();
    assert_eq!(stats.ticks, 10);
    assert!(stats.total_fees > 0.0);
    assert!(stats.total_impact_cost > 0.0);
    // Default 0.1 quantity always fits in the generated depth
    assert_eq!(stats.partial_fills, 0);
}

#[test]
fn test_session_reports_partial_fills_for_oversized_orders() {
    let mut config = create_test_config();
    // Far beyond the depth ten exponential(5) levels can carry
    config.order.quantity = 1000.0;

    let mut session = SimulationSession::from_config(&config, Some(4)).unwrap();
    for _ in 0..5 {
        let report = session.tick().unwrap();
        assert!(report.estimate.is_partial_fill());
        assert!(report.estimate.filled_quantity < 1000.0);
    }
    assert_eq!(session.stats().partial_fills, 5);
}

#[tokio::test]
async fn test_run_drives_requested_ticks() {
    let mut config = create_test_config();
    config.session.refresh_interval_ms = 1;

    let mut session = SimulationSession::from_config(&config, Some(17)).unwrap();
    let stats = session.run(20).await.unwrap();

    assert_eq!(stats.ticks, 20);
    assert!(stats.average_latency_ms > 0.0);
    assert!(session.latency().throughput().is_some());
}

#[test]
fn test_tick_report_serializes_to_json() {
    let config = create_test_config();
    let mut session = SimulationSession::from_config(&config, Some(2)).unwrap();
    let report = session.tick().unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("slippage_pct"));
    assert!(json.contains("total_cost"));
    assert!(json.contains("maker_ratio"));
}
