//! Metrics engine — aggregate performance statistics.
//!
//! Pure read-side computation over a ledger snapshot. Basic metrics cover
//! every record; advanced metrics only the settled subset (Win/Loss), and
//! are absent entirely — not zero-filled — when nothing has settled yet.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{BetRecord, BetResult, Sport};

// ---------------------------------------------------------------------------
// Basic metrics
// ---------------------------------------------------------------------------

/// Headline numbers over the full ledger (including Pending/Push).
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BasicMetrics {
    pub total_profit_loss: f64,
    pub total_stake: f64,
    /// Total P/L over total stake, as a percentage. 0 when nothing staked.
    pub roi_pct: f64,
    /// Fraction of *all* records that are wins, as a percentage.
    pub win_rate_pct: f64,
    pub total_bets: usize,
}

/// Compute headline metrics over a ledger snapshot.
pub fn compute_basic(bets: &[BetRecord]) -> BasicMetrics {
    if bets.is_empty() {
        return BasicMetrics::default();
    }

    let total_profit_loss: f64 = bets.iter().map(|b| b.profit_loss).sum();
    let total_stake: f64 = bets.iter().map(|b| b.stake).sum();
    let roi_pct = if total_stake > 0.0 {
        total_profit_loss / total_stake * 100.0
    } else {
        0.0
    };
    let wins = bets.iter().filter(|b| b.result == BetResult::Win).count();
    let win_rate_pct = wins as f64 / bets.len() as f64 * 100.0;

    BasicMetrics {
        total_profit_loss,
        total_stake,
        roi_pct,
        win_rate_pct,
        total_bets: bets.len(),
    }
}

// ---------------------------------------------------------------------------
// Advanced metrics
// ---------------------------------------------------------------------------

/// Statistics over the settled subset (result ∈ {Win, Loss}).
///
/// Pending and Push records are excluded from all of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedMetrics {
    /// Mean decimal odds of winning bets; 0 when there are no wins.
    pub avg_win_odds: f64,
    /// Mean decimal odds of losing bets; 0 when there are no losses.
    pub avg_loss_odds: f64,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    /// Mean settled profit/loss per bet.
    pub expected_value: f64,
    pub avg_stake: f64,
    /// Gross winnings (profit + returned stake) over gross losses.
    /// `f64::INFINITY` when nothing has been lost (serializes as null).
    pub profit_factor: f64,
    pub settled_bets: usize,
}

/// Compute advanced statistics, or `None` when no record has settled.
///
/// Callers must treat the absent case distinctly from a zero-valued one.
pub fn compute_advanced(bets: &[BetRecord]) -> Option<AdvancedMetrics> {
    let settled: Vec<&BetRecord> = bets.iter().filter(|b| b.result.is_settled()).collect();
    if settled.is_empty() {
        return None;
    }

    let wins: Vec<&&BetRecord> = settled.iter().filter(|b| b.result == BetResult::Win).collect();
    let losses: Vec<&&BetRecord> = settled.iter().filter(|b| b.result == BetResult::Loss).collect();

    let avg_win_odds = if wins.is_empty() {
        0.0
    } else {
        wins.iter().map(|b| b.odds).sum::<f64>() / wins.len() as f64
    };
    let avg_loss_odds = if losses.is_empty() {
        0.0
    } else {
        losses.iter().map(|b| b.odds).sum::<f64>() / losses.len() as f64
    };

    let biggest_win = settled.iter().map(|b| b.profit_loss).fold(f64::MIN, f64::max);
    let biggest_loss = settled.iter().map(|b| b.profit_loss).fold(f64::MAX, f64::min);

    let expected_value =
        settled.iter().map(|b| b.profit_loss).sum::<f64>() / settled.len() as f64;
    let avg_stake = settled.iter().map(|b| b.stake).sum::<f64>() / settled.len() as f64;

    // Gross won = win profit plus the returned stakes; gross lost = stakes
    // surrendered on losses. Infinite when nothing has been lost yet.
    let total_won: f64 = wins.iter().map(|b| b.profit_loss + b.stake).sum();
    let total_lost: f64 = losses.iter().map(|b| b.stake).sum();
    let profit_factor = if total_lost > 0.0 {
        total_won / total_lost
    } else {
        f64::INFINITY
    };

    Some(AdvancedMetrics {
        avg_win_odds,
        avg_loss_odds,
        biggest_win,
        biggest_loss,
        expected_value,
        avg_stake,
        profit_factor,
        settled_bets: settled.len(),
    })
}

// ---------------------------------------------------------------------------
// Per-sport breakdown
// ---------------------------------------------------------------------------

/// Aggregate performance for one sport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportBreakdown {
    pub sport: Sport,
    pub total_profit_loss: f64,
    pub total_stake: f64,
    /// Win fraction over all of this sport's records, as a percentage.
    pub win_rate_pct: f64,
    pub bets: usize,
}

/// Group the ledger by sport and aggregate P/L, stake, and win rate.
/// Only sports present in the data appear; order follows the `Sport` enum.
pub fn compute_sport_breakdown(bets: &[BetRecord]) -> Vec<SportBreakdown> {
    let mut groups: BTreeMap<Sport, Vec<&BetRecord>> = BTreeMap::new();
    for bet in bets {
        groups.entry(bet.sport).or_default().push(bet);
    }

    groups
        .into_iter()
        .map(|(sport, group)| {
            let wins = group.iter().filter(|b| b.result == BetResult::Win).count();
            SportBreakdown {
                sport,
                total_profit_loss: group.iter().map(|b| b.profit_loss).sum(),
                total_stake: group.iter().map(|b| b.stake).sum(),
                win_rate_pct: wins as f64 / group.len() as f64 * 100.0,
                bets: group.len(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
