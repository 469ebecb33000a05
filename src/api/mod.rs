//! HTTP API — the surface the dashboard UI talks to.
//!
//! Axum router over the store, JSON in and out, CSV for the export
//! endpoint. CORS enabled for local development.

pub mod routes;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::storage::Store;

/// Build the Axum router with all routes and middleware.
pub fn build_router(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/bets", get(routes::list_bets).post(routes::add_bet))
        .route(
            "/api/bets/:id",
            get(routes::get_bet)
                .put(routes::update_bet)
                .delete(routes::delete_bet),
        )
        .route("/api/parlay/odds", post(routes::parlay_odds))
        .route("/api/metrics", get(routes::basic_metrics))
        .route("/api/metrics/advanced", get(routes::advanced_metrics))
        .route("/api/metrics/sports", get(routes::sport_breakdown))
        .route(
            "/api/bankroll",
            get(routes::get_bankroll).post(routes::adjust_bankroll),
        )
        .route("/api/quotes", get(routes::list_quotes).post(routes::add_quote))
        .route("/api/quotes/:id", axum::routing::delete(routes::delete_quote))
        .route("/api/export", get(routes::export_csv))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(store)
}
