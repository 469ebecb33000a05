//! API route handlers.
//!
//! Thin wrappers over the store, settlement engine, and metrics engine.
//! Validation errors come back as 422 with the full violation list,
//! missing ids as 404, storage failures as 500.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::export;
use crate::metrics::{self, AdvancedMetrics, BasicMetrics, SportBreakdown};
use crate::settlement;
use crate::storage::Store;
use crate::types::{BankrollOp, BetDraft, BetRecord, LedgerError, ParlayLeg, Quote, QuoteCategory};

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Wrapper turning `LedgerError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            LedgerError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "validation failed", "violations": violations }),
            ),
            LedgerError::BetNotFound(_) | LedgerError::QuoteNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.0.to_string() }))
            }
            _ => {
                error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.0.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// GET /api/bets
pub async fn list_bets(State(store): State<Store>) -> ApiResult<Json<Vec<BetRecord>>> {
    Ok(Json(store.list_bets().await?))
}

/// POST /api/bets
pub async fn add_bet(
    State(store): State<Store>,
    Json(draft): Json<BetDraft>,
) -> ApiResult<(StatusCode, Json<BetRecord>)> {
    let id = store.add_bet(&draft).await?;
    let bet = store
        .get_bet(id)
        .await?
        .ok_or(LedgerError::BetNotFound(id))?;
    Ok((StatusCode::CREATED, Json(bet)))
}

/// GET /api/bets/:id
pub async fn get_bet(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> ApiResult<Json<BetRecord>> {
    let bet = store
        .get_bet(id)
        .await?
        .ok_or(LedgerError::BetNotFound(id))?;
    Ok(Json(bet))
}

/// PUT /api/bets/:id — full replace, never a merge.
pub async fn update_bet(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(draft): Json<BetDraft>,
) -> ApiResult<Json<BetRecord>> {
    store.update_bet(id, &draft).await?;
    let bet = store
        .get_bet(id)
        .await?
        .ok_or(LedgerError::BetNotFound(id))?;
    Ok(Json(bet))
}

/// DELETE /api/bets/:id
pub async fn delete_bet(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    store.delete_bet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Parlay odds preview
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ParlayOddsRequest {
    #[serde(default)]
    pub legs: Vec<ParlayLeg>,
}

#[derive(Debug, Serialize)]
pub struct ParlayOddsResponse {
    pub combined_odds: f64,
    pub legs: usize,
}

/// POST /api/parlay/odds — combined-odds preview for the UI leg builder.
pub async fn parlay_odds(Json(req): Json<ParlayOddsRequest>) -> Json<ParlayOddsResponse> {
    Json(ParlayOddsResponse {
        combined_odds: settlement::combine_parlay_odds(&req.legs),
        legs: req.legs.len(),
    })
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// GET /api/metrics
pub async fn basic_metrics(State(store): State<Store>) -> ApiResult<Json<BasicMetrics>> {
    let bets = store.list_bets().await?;
    Ok(Json(metrics::compute_basic(&bets)))
}

/// GET /api/metrics/advanced — null body until something has settled.
pub async fn advanced_metrics(
    State(store): State<Store>,
) -> ApiResult<Json<Option<AdvancedMetrics>>> {
    let bets = store.list_bets().await?;
    Ok(Json(metrics::compute_advanced(&bets)))
}

/// GET /api/metrics/sports
pub async fn sport_breakdown(
    State(store): State<Store>,
) -> ApiResult<Json<Vec<SportBreakdown>>> {
    let bets = store.list_bets().await?;
    Ok(Json(metrics::compute_sport_breakdown(&bets)))
}

// ---------------------------------------------------------------------------
// Bankroll
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BankrollResponse {
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub struct BankrollRequest {
    pub amount: f64,
    pub op: BankrollOp,
}

/// GET /api/bankroll
pub async fn get_bankroll(State(store): State<Store>) -> ApiResult<Json<BankrollResponse>> {
    Ok(Json(BankrollResponse {
        balance: store.get_balance().await?,
    }))
}

/// POST /api/bankroll
pub async fn adjust_bankroll(
    State(store): State<Store>,
    Json(req): Json<BankrollRequest>,
) -> ApiResult<Json<BankrollResponse>> {
    Ok(Json(BankrollResponse {
        balance: store.adjust_balance(req.amount, req.op).await?,
    }))
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub quote_text: String,
    #[serde(default)]
    pub category: QuoteCategory,
}

/// GET /api/quotes
pub async fn list_quotes(State(store): State<Store>) -> ApiResult<Json<Vec<Quote>>> {
    Ok(Json(store.list_quotes().await?))
}

/// POST /api/quotes
pub async fn add_quote(
    State(store): State<Store>,
    Json(req): Json<QuoteRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = store.add_quote(&req.quote_text, req.category).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// DELETE /api/quotes/:id
pub async fn delete_quote(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    store.delete_quote(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// GET /api/export — full ledger as CSV.
pub async fn export_csv(State(store): State<Store>) -> ApiResult<Response> {
    let bets = store.list_bets().await?;
    let csv = export::ledger_to_csv(&bets)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"betbook_export.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
