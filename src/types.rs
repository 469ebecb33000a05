//! Shared types for the BETBOOK ledger.
//!
//! These types form the data model used across all modules: the persisted
//! bet record, the input draft shape the dashboard submits, parlay legs,
//! quotes, and the enumerations stored as text in SQLite.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Category of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BetType {
    Moneyline,
    #[serde(rename = "Over/Under")]
    OverUnder,
    Handicap,
    #[serde(rename = "Both Teams to Score")]
    BothTeamsToScore,
    #[serde(rename = "Correct Score")]
    CorrectScore,
    #[default]
    Other,
    Parlay,
}

impl BetType {
    /// All known bet types (useful for iteration).
    pub const ALL: &'static [BetType] = &[
        BetType::Moneyline,
        BetType::OverUnder,
        BetType::Handicap,
        BetType::BothTeamsToScore,
        BetType::CorrectScore,
        BetType::Other,
        BetType::Parlay,
    ];
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Moneyline => write!(f, "Moneyline"),
            BetType::OverUnder => write!(f, "Over/Under"),
            BetType::Handicap => write!(f, "Handicap"),
            BetType::BothTeamsToScore => write!(f, "Both Teams to Score"),
            BetType::CorrectScore => write!(f, "Correct Score"),
            BetType::Other => write!(f, "Other"),
            BetType::Parlay => write!(f, "Parlay"),
        }
    }
}

/// Attempt to parse a string into a BetType (case-insensitive).
impl std::str::FromStr for BetType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moneyline" => Ok(BetType::Moneyline),
            "over/under" | "over under" | "totals" => Ok(BetType::OverUnder),
            "handicap" | "spread" => Ok(BetType::Handicap),
            "both teams to score" | "btts" => Ok(BetType::BothTeamsToScore),
            "correct score" => Ok(BetType::CorrectScore),
            "other" => Ok(BetType::Other),
            "parlay" => Ok(BetType::Parlay),
            _ => Err(anyhow::anyhow!("Unknown bet type: {s}")),
        }
    }
}

/// Sport a bet belongs to. `Mixed` is used for parlays that span sports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Sport {
    Soccer,
    Basketball,
    Tennis,
    Football,
    Baseball,
    Hockey,
    #[default]
    Other,
    Mixed,
}

impl Sport {
    /// All known sports (useful for iteration).
    pub const ALL: &'static [Sport] = &[
        Sport::Soccer,
        Sport::Basketball,
        Sport::Tennis,
        Sport::Football,
        Sport::Baseball,
        Sport::Hockey,
        Sport::Other,
        Sport::Mixed,
    ];
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Soccer => write!(f, "Soccer"),
            Sport::Basketball => write!(f, "Basketball"),
            Sport::Tennis => write!(f, "Tennis"),
            Sport::Football => write!(f, "Football"),
            Sport::Baseball => write!(f, "Baseball"),
            Sport::Hockey => write!(f, "Hockey"),
            Sport::Other => write!(f, "Other"),
            Sport::Mixed => write!(f, "Mixed"),
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "soccer" => Ok(Sport::Soccer),
            "basketball" => Ok(Sport::Basketball),
            "tennis" => Ok(Sport::Tennis),
            "football" => Ok(Sport::Football),
            "baseball" => Ok(Sport::Baseball),
            "hockey" => Ok(Sport::Hockey),
            "other" => Ok(Sport::Other),
            "mixed" => Ok(Sport::Mixed),
            _ => Err(anyhow::anyhow!("Unknown sport: {s}")),
        }
    }
}

/// Outcome of a bet. `Push` is a refund; both `Push` and `Pending`
/// settle to zero profit/loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetResult {
    Pending,
    Win,
    Loss,
    Push,
}

impl BetResult {
    /// Whether this result counts toward the settled subset used by
    /// advanced metrics.
    pub fn is_settled(&self) -> bool {
        matches!(self, BetResult::Win | BetResult::Loss)
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Pending => write!(f, "Pending"),
            BetResult::Win => write!(f, "Win"),
            BetResult::Loss => write!(f, "Loss"),
            BetResult::Push => write!(f, "Push"),
        }
    }
}

impl std::str::FromStr for BetResult {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BetResult::Pending),
            "win" => Ok(BetResult::Win),
            "loss" => Ok(BetResult::Loss),
            "push" => Ok(BetResult::Push),
            _ => Err(anyhow::anyhow!("Unknown bet result: {s}")),
        }
    }
}

/// Category of a motivational quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuoteCategory {
    #[default]
    Motivation,
    Discipline,
    Strategy,
    Mindset,
    Inspiration,
    Other,
}

impl fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteCategory::Motivation => write!(f, "Motivation"),
            QuoteCategory::Discipline => write!(f, "Discipline"),
            QuoteCategory::Strategy => write!(f, "Strategy"),
            QuoteCategory::Mindset => write!(f, "Mindset"),
            QuoteCategory::Inspiration => write!(f, "Inspiration"),
            QuoteCategory::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for QuoteCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "motivation" => Ok(QuoteCategory::Motivation),
            "discipline" => Ok(QuoteCategory::Discipline),
            "strategy" => Ok(QuoteCategory::Strategy),
            "mindset" => Ok(QuoteCategory::Mindset),
            "inspiration" => Ok(QuoteCategory::Inspiration),
            "other" => Ok(QuoteCategory::Other),
            _ => Err(anyhow::anyhow!("Unknown quote category: {s}")),
        }
    }
}

/// Bankroll mutation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankrollOp {
    /// Relative deposit.
    Add,
    /// Relative withdrawal. No overdraft floor is enforced at this layer;
    /// any withdrawal cap is a presentation concern.
    Subtract,
    /// Absolute replace.
    Set,
}

impl fmt::Display for BankrollOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankrollOp::Add => write!(f, "add"),
            BankrollOp::Subtract => write!(f, "subtract"),
            BankrollOp::Set => write!(f, "set"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet records
// ---------------------------------------------------------------------------

/// One leg of a parlay. Legs carry descriptive fields and odds only;
/// stake and result live on the parent bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayLeg {
    #[serde(default)]
    pub team_a: String,
    #[serde(default)]
    pub team_b: String,
    #[serde(default)]
    pub bet_type: BetType,
    #[serde(default)]
    pub sport: Sport,
    /// Decimal odds for this leg (≥ 1.0).
    pub odds: f64,
    #[serde(default)]
    pub notes: String,
}

impl ParlayLeg {
    /// Helper to build a test leg with the given odds.
    #[cfg(test)]
    pub fn with_odds(odds: f64) -> Self {
        ParlayLeg {
            team_a: "Home".to_string(),
            team_b: "Away".to_string(),
            bet_type: BetType::Moneyline,
            sport: Sport::Soccer,
            odds,
            notes: String::new(),
        }
    }
}

/// A persisted bet, single or parlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub team_a: String,
    pub team_b: String,
    pub bet_type: BetType,
    pub sport: Sport,
    /// Pooled stake for the whole bet, including all parlay legs.
    pub stake: f64,
    /// Decimal odds. For a parlay this is the combined leg odds,
    /// rounded to two decimal places.
    pub odds: f64,
    pub result: BetResult,
    /// Derived from stake/odds/result at write time; never accepted
    /// as independent input.
    pub profit_loss: f64,
    pub notes: String,
    pub is_parlay: bool,
    #[serde(default)]
    pub parlay_legs: Vec<ParlayLeg>,
}

impl fmt::Display for BetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_parlay {
            write!(
                f,
                "#{} {} PARLAY ({} legs) €{:.2} @ {:.2} → {} ({:+.2})",
                self.id,
                self.date,
                self.parlay_legs.len(),
                self.stake,
                self.odds,
                self.result,
                self.profit_loss,
            )
        } else {
            write!(
                f,
                "#{} {} {} vs {} €{:.2} @ {:.2} → {} ({:+.2})",
                self.id,
                self.date,
                self.team_a,
                self.team_b,
                self.stake,
                self.odds,
                self.result,
                self.profit_loss,
            )
        }
    }
}

/// Input shape for creating or fully replacing a bet.
///
/// `result` arrives as free text so the validator can report a bad value
/// alongside stake/odds violations instead of failing at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub team_a: String,
    #[serde(default)]
    pub team_b: String,
    #[serde(default)]
    pub bet_type: BetType,
    #[serde(default)]
    pub sport: Sport,
    pub stake: f64,
    #[serde(default = "default_odds")]
    pub odds: f64,
    pub result: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_parlay: bool,
    #[serde(default)]
    pub parlay_legs: Vec<ParlayLeg>,
}

fn default_odds() -> f64 {
    1.0
}

impl BetDraft {
    /// Helper to build a minimal single-bet draft.
    #[cfg(test)]
    pub fn sample() -> Self {
        BetDraft {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            team_a: "Arsenal".to_string(),
            team_b: "Chelsea".to_string(),
            bet_type: BetType::Moneyline,
            sport: Sport::Soccer,
            stake: 100.0,
            odds: 2.0,
            result: "Win".to_string(),
            notes: "London derby".to_string(),
            is_parlay: false,
            parlay_legs: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// A persisted motivational quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub quote_text: String,
    pub category: QuoteCategory,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for BETBOOK.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Input violated the bet contract. Carries every violated rule,
    /// not just the first.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bet not found: {0}")]
    BetNotFound(i64),

    #[error("Quote not found: {0}")]
    QuoteNotFound(i64),

    /// A persisted row that cannot be decoded into a `BetRecord`.
    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: i64, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_type_display_roundtrip() {
        for bt in BetType::ALL {
            let parsed: BetType = bt.to_string().parse().unwrap();
            assert_eq!(*bt, parsed);
        }
    }

    #[test]
    fn test_bet_type_serde_rename() {
        let json = serde_json::to_string(&BetType::OverUnder).unwrap();
        assert_eq!(json, "\"Over/Under\"");
        let parsed: BetType = serde_json::from_str("\"Both Teams to Score\"").unwrap();
        assert_eq!(parsed, BetType::BothTeamsToScore);
    }

    #[test]
    fn test_bet_type_from_str_aliases() {
        assert_eq!("totals".parse::<BetType>().unwrap(), BetType::OverUnder);
        assert_eq!("spread".parse::<BetType>().unwrap(), BetType::Handicap);
        assert!("first goalscorer".parse::<BetType>().is_err());
    }

    #[test]
    fn test_sport_display_roundtrip() {
        for s in Sport::ALL {
            let parsed: Sport = s.to_string().parse().unwrap();
            assert_eq!(*s, parsed);
        }
    }

    #[test]
    fn test_sport_from_str_unknown() {
        assert!("cricket".parse::<Sport>().is_err());
    }

    #[test]
    fn test_result_from_str() {
        assert_eq!("win".parse::<BetResult>().unwrap(), BetResult::Win);
        assert_eq!("PUSH".parse::<BetResult>().unwrap(), BetResult::Push);
        assert!("void".parse::<BetResult>().is_err());
    }

    #[test]
    fn test_result_is_settled() {
        assert!(BetResult::Win.is_settled());
        assert!(BetResult::Loss.is_settled());
        assert!(!BetResult::Pending.is_settled());
        assert!(!BetResult::Push.is_settled());
    }

    #[test]
    fn test_quote_category_roundtrip() {
        for s in ["Motivation", "Discipline", "Strategy", "Mindset", "Inspiration", "Other"] {
            let cat: QuoteCategory = s.parse().unwrap();
            assert_eq!(cat.to_string(), s);
        }
    }

    #[test]
    fn test_bankroll_op_deserialize_lowercase() {
        let op: BankrollOp = serde_json::from_str("\"subtract\"").unwrap();
        assert_eq!(op, BankrollOp::Subtract);
    }

    #[test]
    fn test_bet_draft_deserialize_defaults() {
        let draft: BetDraft = serde_json::from_str(
            r#"{"date":"2026-01-05","stake":25.0,"odds":1.8,"result":"Pending"}"#,
        )
        .unwrap();
        assert_eq!(draft.team_a, "");
        assert_eq!(draft.bet_type, BetType::Other);
        assert_eq!(draft.sport, Sport::Other);
        assert!(!draft.is_parlay);
        assert!(draft.parlay_legs.is_empty());
    }

    #[test]
    fn test_bet_record_display_single() {
        let record = BetRecord {
            id: 7,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            team_a: "Lakers".to_string(),
            team_b: "Celtics".to_string(),
            bet_type: BetType::Moneyline,
            sport: Sport::Basketball,
            stake: 50.0,
            odds: 1.9,
            result: BetResult::Loss,
            profit_loss: -50.0,
            notes: String::new(),
            is_parlay: false,
            parlay_legs: Vec::new(),
        };
        let display = format!("{record}");
        assert!(display.contains("Lakers"));
        assert!(display.contains("-50.00"));
    }

    #[test]
    fn test_parlay_leg_serde_roundtrip() {
        let leg = ParlayLeg {
            team_a: "Bayern".to_string(),
            team_b: "Dortmund".to_string(),
            bet_type: BetType::OverUnder,
            sport: Sport::Soccer,
            odds: 1.85,
            notes: "Over 2.5".to_string(),
        };
        let json = serde_json::to_string(&leg).unwrap();
        let parsed: ParlayLeg = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, leg);
    }

    #[test]
    fn test_ledger_error_validation_display() {
        let e = LedgerError::Validation(vec![
            "Stake must be positive".to_string(),
            "Odds must be at least 1.0".to_string(),
        ]);
        let msg = format!("{e}");
        assert!(msg.contains("Stake must be positive; Odds must be at least 1.0"));
    }
}
