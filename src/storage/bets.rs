//! Bet ledger store — CRUD over bet records.
//!
//! Validation and profit/loss derivation happen here at write time, via
//! the settlement engine. Reads resolve legacy NULL/empty fields to
//! neutral defaults once, at this boundary, so the rest of the crate only
//! ever sees fully-populated `BetRecord`s.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

use crate::settlement;
use crate::types::{BetDraft, BetRecord, BetResult, LedgerError, ParlayLeg, Result};

use super::Store;

impl Store {
    /// Insert a new bet and return its assigned id.
    ///
    /// Fails with `LedgerError::Validation` (listing every violated rule)
    /// before anything is written. For parlays the persisted odds are the
    /// combined leg odds, regardless of what the draft carried.
    pub async fn add_bet(&self, draft: &BetDraft) -> Result<i64> {
        let prepared = prepare(draft)?;

        let res = sqlx::query(
            "INSERT INTO bets
             (date, team_a, team_b, bet_type, sport, stake, odds, result,
              profit_loss, notes, is_parlay, parlay_legs)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(draft.date)
        .bind(&draft.team_a)
        .bind(&draft.team_b)
        .bind(draft.bet_type.to_string())
        .bind(draft.sport.to_string())
        .bind(draft.stake)
        .bind(prepared.odds)
        .bind(prepared.result.to_string())
        .bind(prepared.profit_loss)
        .bind(&draft.notes)
        .bind(draft.is_parlay)
        .bind(&prepared.legs_json)
        .execute(&self.pool)
        .await?;

        let id = res.last_insert_rowid();
        info!(
            id,
            stake = draft.stake,
            odds = prepared.odds,
            result = %prepared.result,
            is_parlay = draft.is_parlay,
            "Bet added"
        );
        Ok(id)
    }

    /// Fully replace the bet with the given id. Every field is overwritten
    /// (no merge) and profit/loss is re-derived.
    pub async fn update_bet(&self, id: i64, draft: &BetDraft) -> Result<()> {
        let prepared = prepare(draft)?;

        let res = sqlx::query(
            "UPDATE bets
             SET date = ?, team_a = ?, team_b = ?, bet_type = ?, sport = ?,
                 stake = ?, odds = ?, result = ?, profit_loss = ?, notes = ?,
                 is_parlay = ?, parlay_legs = ?
             WHERE id = ?",
        )
        .bind(draft.date)
        .bind(&draft.team_a)
        .bind(&draft.team_b)
        .bind(draft.bet_type.to_string())
        .bind(draft.sport.to_string())
        .bind(draft.stake)
        .bind(prepared.odds)
        .bind(prepared.result.to_string())
        .bind(prepared.profit_loss)
        .bind(&draft.notes)
        .bind(draft.is_parlay)
        .bind(&prepared.legs_json)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(LedgerError::BetNotFound(id));
        }
        info!(id, result = %prepared.result, "Bet updated");
        Ok(())
    }

    /// Fetch a single bet by id.
    pub async fn get_bet(&self, id: i64) -> Result<Option<BetRecord>> {
        let row = sqlx::query("SELECT * FROM bets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_bet(&r)).transpose()
    }

    /// All bets, newest date first.
    pub async fn list_bets(&self) -> Result<Vec<BetRecord>> {
        let rows = sqlx::query("SELECT * FROM bets ORDER BY date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_bet).collect()
    }

    /// Delete a bet. Embedded parlay legs disappear with the row.
    pub async fn delete_bet(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM bets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(LedgerError::BetNotFound(id));
        }
        debug!(id, "Bet deleted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Write-time derivation
// ---------------------------------------------------------------------------

struct PreparedBet {
    odds: f64,
    result: BetResult,
    profit_loss: f64,
    legs_json: Option<String>,
}

/// Validate a draft and derive the persisted fields.
fn prepare(draft: &BetDraft) -> Result<PreparedBet> {
    // Parlay odds are always derived from the legs when legs are present;
    // the draft's own odds field only matters for single bets.
    let odds = if draft.is_parlay && !draft.parlay_legs.is_empty() {
        settlement::combine_parlay_odds(&draft.parlay_legs)
    } else {
        draft.odds
    };

    let mut violations = settlement::validate(draft.stake, odds, &draft.result);
    for (i, leg) in draft.parlay_legs.iter().enumerate() {
        if leg.odds < 1.0 {
            violations.push(format!("Leg {} odds must be at least 1.0", i + 1));
        }
    }
    if !violations.is_empty() {
        return Err(LedgerError::Validation(violations));
    }

    // The result string passed validation above, so this parse cannot
    // fail; still surface it as a violation rather than panicking.
    let result = draft
        .result
        .parse::<BetResult>()
        .map_err(|e| LedgerError::Validation(vec![e.to_string()]))?;

    let legs_json = if draft.is_parlay && !draft.parlay_legs.is_empty() {
        Some(serde_json::to_string(&draft.parlay_legs)?)
    } else {
        None
    };

    Ok(PreparedBet {
        odds,
        result,
        profit_loss: settlement::settle(draft.stake, odds, result),
        legs_json,
    })
}

// ---------------------------------------------------------------------------
// Read-side decoding
// ---------------------------------------------------------------------------

/// Decode a row into a `BetRecord`, resolving legacy NULL/empty fields to
/// neutral defaults. A second defensive layer beyond the schema manager.
fn row_to_bet(row: &SqliteRow) -> Result<BetRecord> {
    let id: i64 = row.try_get("id")?;
    let result_raw: String = row.try_get("result")?;
    let result = result_raw
        .parse::<BetResult>()
        .map_err(|e| LedgerError::CorruptRecord { id, reason: e.to_string() })?;

    let legs_raw: Option<String> = row.try_get("parlay_legs")?;
    let parlay_legs: Vec<ParlayLeg> = match legs_raw.as_deref() {
        Some(json) if !json.is_empty() => serde_json::from_str(json)
            .map_err(|e| LedgerError::CorruptRecord { id, reason: e.to_string() })?,
        _ => Vec::new(),
    };

    Ok(BetRecord {
        id,
        date: row.try_get::<NaiveDate, _>("date")?,
        team_a: row.try_get::<Option<String>, _>("team_a")?.unwrap_or_default(),
        team_b: row.try_get::<Option<String>, _>("team_b")?.unwrap_or_default(),
        bet_type: parse_or_default(row.try_get("bet_type")?),
        sport: parse_or_default(row.try_get("sport")?),
        stake: row.try_get("stake")?,
        odds: row.try_get("odds")?,
        result,
        profit_loss: row.try_get("profit_loss")?,
        notes: row.try_get::<Option<String>, _>("notes")?.unwrap_or_default(),
        is_parlay: row.try_get::<Option<bool>, _>("is_parlay")?.unwrap_or(false),
        parlay_legs,
    })
}

/// Parse a stored enum string, falling back to the type's default for
/// NULL, empty, or unrecognized values (legacy rows).
fn parse_or_default<T: FromStr + Default>(raw: Option<String>) -> T {
    raw.as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
