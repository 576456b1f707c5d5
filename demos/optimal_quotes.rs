//! Optimal Quotes Example
//!
//! This example demonstrates the full quoting pipeline:
//! - Weibull beliefs about the true price
//! - Liquidity participation that decays with quote distance
//! - Expected profit net of adverse selection, maximized over (ask, bid)
//!
//! Run with: `cargo run --example optimal_quotes`
//! Set `RUST_LOG=debug` to follow the search.

use spread_optimizer_rs::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Optimal Quotes Example ===\n");

    let config = EngineConfig::default();
    println!("Configuration:");
    println!("  Shape (k): {}", config.shape);
    println!("  Scale (λ): {}", config.scale);
    println!("  Reference Price (P0): {}", config.reference_price);
    println!("  Informed Trade Probability (Pi_I): {}", config.informed_trade_probability);
    println!("  Sensitivity: {}\n", config.sensitivity);

    let engine = QuoteEngine::new(config).expect("Valid config");

    println!("--- Price Distribution ---\n");
    println!("  Mean true price: {:.4}", engine.distribution().mean());
    for price in [30.0, 40.0, 45.0, 50.0, 55.0, 60.0] {
        println!("  density({:>5.1}) = {:.6}", price, engine.density_at(price));
    }
    let draws = engine.sample_distribution(10_000, 42);
    let sample_mean = draws.iter().sum::<f64>() / draws.len() as f64;
    println!("  Sample mean of 10,000 draws (seed 42): {:.4}\n", sample_mean);

    println!("--- Optimal Quotes ---\n");
    match engine.compute_optimal_quotes() {
        OptimizationResult::Converged(quote) => {
            println!("  Optimal Bid: {:.4}", quote.bid);
            println!("  Optimal Ask: {:.4}", quote.ask);
            println!("  Spread: {:.4}", quote.spread());
            println!("  Expected Profit: {:.6}", quote.expected_profit);
            println!(
                "  Iterations: {} ({} evaluations)\n",
                quote.iterations, quote.evaluations
            );

            let breakdown = engine
                .evaluate(&quote.candidate())
                .expect("Valid evaluation");
            println!("--- Profit Breakdown ---\n");
            println!("  Income: {:.6}", breakdown.income);
            println!("  Cost above ask: {:.6}", breakdown.cost_above_ask);
            println!("  Cost below bid: {:.6}", breakdown.cost_below_bid);
            println!("  Adverse selection cost: {:.6}\n", breakdown.adverse_selection_cost);

            let published = Quote::from_prices(quote.bid, quote.ask, dec!(0.01))
                .expect("Valid tick size");
            println!("--- Published Quote (tick 0.01) ---\n");
            println!("  Bid: {}  Ask: {}", published.bid, published.ask);
        }
        OptimizationResult::Failed(failure) => {
            println!(
                "  No valid bid/ask: {} after {} iterations",
                failure.reason, failure.iterations
            );
        }
    }
}
