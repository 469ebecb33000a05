//! Settlement engine — pure profit/loss derivation.
//!
//! Everything here is side-effect free: the ledger store calls into this
//! module at write time to validate inputs, combine parlay odds, and
//! derive `profit_loss`. The derived value is never accepted from callers.

use crate::types::{BetResult, ParlayLeg};

/// Derive profit/loss from stake, decimal odds, and outcome.
///
/// Win → `stake * (odds - 1)`, Loss → `-stake`. Pending and Push both net
/// zero: a push is a refund, a pending bet is not yet resolved. The shared
/// zero is intentional, not a bug.
pub fn settle(stake: f64, odds: f64, result: BetResult) -> f64 {
    match result {
        BetResult::Win => stake * (odds - 1.0),
        BetResult::Loss => -stake,
        BetResult::Pending | BetResult::Push => 0.0,
    }
}

/// Validate bet inputs against the ledger contract.
///
/// Returns every violated rule, not just the first — callers must refuse
/// the operation if the list is non-empty.
pub fn validate(stake: f64, odds: f64, result: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if stake <= 0.0 {
        errors.push("Stake must be positive".to_string());
    }
    if odds < 1.0 {
        errors.push("Odds must be at least 1.0".to_string());
    }
    if result.parse::<BetResult>().is_err() {
        errors.push("Result must be one of Pending, Win, Loss, Push".to_string());
    }
    errors
}

/// Combine parlay leg odds multiplicatively.
///
/// An empty leg list yields neutral odds of 1.0. The product accumulates
/// at full precision and is rounded to two decimals only at the end — the
/// single rounding point the design allows.
pub fn combine_parlay_odds(legs: &[ParlayLeg]) -> f64 {
    let combined = legs.iter().fold(1.0, |acc, leg| acc * leg.odds);
    (combined * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
