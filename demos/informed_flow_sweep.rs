//! Informed Flow Sweep Example
//!
//! This example shows how the optimal quotes react to the share of informed
//! counterparties:
//! - With no informed flow each side sits 0.25 / sensitivity from P0
//! - As Pi_I grows the quotes move out and expected profit falls
//!
//! Run with: `cargo run --example informed_flow_sweep`

use spread_optimizer_rs::prelude::*;

fn main() {
    println!("=== Informed Flow Sweep ===\n");
    println!(
        "{:>6} {:>10} {:>10} {:>10} {:>12}",
        "Pi_I", "Bid", "Ask", "Spread", "Profit"
    );

    for step in 0..=8 {
        let informed = f64::from(step) * 0.1;
        let config = EngineConfig::default().with_informed_trade_probability(informed);
        let engine = QuoteEngine::new(config).expect("Valid config");

        match engine.compute_optimal_quotes() {
            OptimizationResult::Converged(quote) => println!(
                "{:>6.2} {:>10.4} {:>10.4} {:>10.4} {:>12.6}",
                informed,
                quote.bid,
                quote.ask,
                quote.spread(),
                quote.expected_profit
            ),
            OptimizationResult::Failed(failure) => {
                println!("{:>6.2} failed: {}", informed, failure.reason);
            }
        }
    }
}
