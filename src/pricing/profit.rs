//! Per-listing profit estimate, ranking and the alert decision.

use crate::sources::RawListing;
use serde::{Deserialize, Serialize};

/// Share of the resale price kept after marketplace fees.
pub const RESALE_FACTOR: f64 = 0.9;

/// Estimated profit of buying at `price` and reselling at `market_price`.
///
/// `round(market_price * 0.9 - shipping_cost - price)`, may be negative.
pub fn estimate_profit(market_price: u64, shipping_cost: u64, price: u64) -> i64 {
    (market_price as f64 * RESALE_FACTOR - shipping_cost as f64 - price as f64).round() as i64
}

/// An active listing with its estimated profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(flatten)]
    pub listing: RawListing,
    pub profit: i64,
}

/// Scores listings against a market price and sorts them by profit, best first.
///
/// The sort is stable: equal profits keep their page order.
pub fn rank(market_price: u64, shipping_cost: u64, listings: Vec<RawListing>) -> Vec<Opportunity> {
    let mut ranked: Vec<Opportunity> = listings
        .into_iter()
        .map(|listing| {
            let profit = estimate_profit(market_price, shipping_cost, listing.price);
            Opportunity { listing, profit }
        })
        .collect();

    ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
    ranked
}

/// Outcome of checking the best candidate against the alert threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Alert {
    /// Best profit meets the threshold.
    Triggered { best: Opportunity, threshold: i64 },
    /// Best profit falls short by `shortfall`.
    Below { best_profit: i64, threshold: i64, shortfall: i64 },
    /// Nothing to rank.
    NoCandidates,
}

impl Alert {
    /// Evaluates a ranked list (best first) against the threshold.
    pub fn evaluate(ranked: &[Opportunity], threshold: i64) -> Self {
        match ranked.first() {
            Some(best) if best.profit >= threshold => {
                Alert::Triggered { best: best.clone(), threshold }
            }
            Some(best) => Alert::Below {
                best_profit: best.profit,
                threshold,
                shortfall: threshold.saturating_sub(best.profit),
            },
            None => Alert::NoCandidates,
        }
    }

    /// True when the alert fired.
    pub fn is_triggered(&self) -> bool {
        matches!(self, Alert::Triggered { .. })
    }
}
