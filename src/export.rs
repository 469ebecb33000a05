//! Ledger export — full ledger to delimited text.
//!
//! One-directional: the CSV is meant for spreadsheet import, and there is
//! no import path back. Every bet field appears in table order; parlay
//! legs are embedded as their JSON payload in the final column.

use crate::types::{BetRecord, Result};

/// Column order matches the bets table.
const HEADER: &str =
    "id,date,team_a,team_b,bet_type,sport,stake,odds,result,profit_loss,notes,is_parlay,parlay_legs";

/// Render the full ledger as CSV, header included.
pub fn ledger_to_csv(bets: &[BetRecord]) -> Result<String> {
    let mut out = String::from(HEADER);
    out.push('\n');

    for bet in bets {
        let legs_json = if bet.parlay_legs.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&bet.parlay_legs)?
        };

        let fields = [
            bet.id.to_string(),
            bet.date.to_string(),
            bet.team_a.clone(),
            bet.team_b.clone(),
            bet.bet_type.to_string(),
            bet.sport.to_string(),
            bet.stake.to_string(),
            bet.odds.to_string(),
            bet.result.to_string(),
            bet.profit_loss.to_string(),
            bet.notes.clone(),
            if bet.is_parlay { "1" } else { "0" }.to_string(),
            legs_json,
        ];

        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// RFC 4180 quoting: wrap the field when it contains a delimiter, quote,
/// or newline, doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BetResult, BetType, ParlayLeg, Sport};
    use chrono::NaiveDate;

    fn sample_bet() -> BetRecord {
        BetRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            team_a: "Arsenal".to_string(),
            team_b: "Chelsea".to_string(),
            bet_type: BetType::Moneyline,
            sport: Sport::Soccer,
            stake: 100.0,
            odds: 2.0,
            result: BetResult::Win,
            profit_loss: 100.0,
            notes: String::new(),
            is_parlay: false,
            parlay_legs: Vec::new(),
        }
    }

    #[test]
    fn test_header_only_for_empty_ledger() {
        let csv = ledger_to_csv(&[]).unwrap();
        assert_eq!(csv, format!("{HEADER}\n"));
    }

    #[test]
    fn test_single_bet_row() {
        let csv = ledger_to_csv(&[sample_bet()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,2026-03-14,Arsenal,Chelsea,Moneyline,Soccer,100,2,Win,100,,0,");
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let bet = BetRecord {
            notes: "late goal, VAR overturned".to_string(),
            team_a: "He said \"easy\"".to_string(),
            ..sample_bet()
        };
        let csv = ledger_to_csv(&[bet]).unwrap();
        assert!(csv.contains("\"late goal, VAR overturned\""));
        assert!(csv.contains("\"He said \"\"easy\"\"\""));
    }

    #[test]
    fn test_parlay_legs_embedded_as_json() {
        let bet = BetRecord {
            is_parlay: true,
            bet_type: BetType::Parlay,
            sport: Sport::Mixed,
            parlay_legs: vec![ParlayLeg::with_odds(2.0)],
            ..sample_bet()
        };
        let csv = ledger_to_csv(&[bet]).unwrap();
        // The JSON payload contains commas, so the field must be quoted.
        assert!(csv.contains("\"[{"));
        assert!(csv.contains("\"\"odds\"\":2.0"));
    }

    #[test]
    fn test_bet_type_display_names_used() {
        let bet = BetRecord {
            bet_type: BetType::BothTeamsToScore,
            ..sample_bet()
        };
        let csv = ledger_to_csv(&[bet]).unwrap();
        assert!(csv.contains(",Both Teams to Score,"));
    }
}
