//! REST API Server for the finance tracker
//!
//! Exposes the session tracker, market ticker and portfolio table over HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::TrackerError;
use crate::market::MarketTicker;
use crate::models::{Category, TransactionKind, TransactionRequest};
use crate::portfolio::RiskProfile;
use crate::smart_input::ParseOutcome;
use crate::tracker::Tracker;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub kind: String,
    /// Number or numeric string; anything else is discarded by the ledger
    pub amount: serde_json::Value,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmartInputRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub tracker: Arc<RwLock<Tracker>>,
    pub market: Arc<MarketTicker>,
}

impl ApiState {
    pub fn new(tracker: Tracker, market: Arc<MarketTicker>) -> Self {
        Self {
            tracker: Arc::new(RwLock::new(tracker)),
            market,
        }
    }
}

/// =============================
/// Helpers
/// =============================

/// Lenient amount reading: numbers as-is, numeric strings parsed, else NaN
fn parse_amount(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Form → request. Only the kind is checked here; the ledger judges the amount.
fn request_from_form(form: &TransactionForm) -> crate::Result<TransactionRequest> {
    let kind = TransactionKind::from_name(&form.kind).ok_or_else(|| {
        TrackerError::InvalidRequest(format!("Unknown transaction kind '{}'", form.kind))
    })?;

    Ok(TransactionRequest {
        kind,
        amount: parse_amount(&form.amount),
        category: match kind {
            TransactionKind::Expense => form.category.as_deref().and_then(Category::from_name),
            _ => None,
        },
    })
}

fn bad_request(err: TrackerError) -> (StatusCode, Json<ApiResponse>) {
    warn!("Rejected request: {}", err);
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(err.to_string())))
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Ledger Endpoints
/// =============================

async fn dashboard(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let snapshot = state.tracker.read().await.snapshot();
    (StatusCode::OK, Json(ApiResponse::success(snapshot)))
}

async fn record_transaction(
    State(state): State<ApiState>,
    Json(form): Json<TransactionForm>,
) -> (StatusCode, Json<ApiResponse>) {
    let request = match request_from_form(&form) {
        Ok(request) => request,
        Err(err) => return bad_request(err),
    };

    let mut tracker = state.tracker.write().await;
    if !tracker.record(request) {
        return bad_request(TrackerError::InvalidRequest(
            "Amount must be a positive number".to_string(),
        ));
    }

    info!(kind = %request.kind, amount = request.amount, "Recorded transaction");
    (StatusCode::OK, Json(ApiResponse::success(tracker.snapshot())))
}

async fn smart_input(
    State(state): State<ApiState>,
    Json(req): Json<SmartInputRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let mut tracker = state.tracker.write().await;

    match tracker.submit_text(&req.text) {
        ParseOutcome::Parsed { request, confirmation } => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "confirmation": confirmation,
                "request": request,
                "snapshot": tracker.snapshot(),
            }))),
        ),
        outcome @ ParseOutcome::NoAmountDetected => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(outcome.to_string())),
        ),
    }
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    if req.message.trim().is_empty() {
        return bad_request(TrackerError::InvalidRequest("No user message found".to_string()));
    }

    // Release the lock before the reply delay
    let (intent, savings_rate, responder) = {
        let tracker = state.tracker.read().await;
        let (intent, savings_rate) = tracker.prepare_reply(&req.message);
        (intent, savings_rate, tracker.responder().clone())
    };

    let reply = responder.respond(intent, savings_rate).await;
    (StatusCode::OK, Json(ApiResponse::success(reply)))
}

/// =============================
/// Display Data Endpoints
/// =============================

async fn market(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let feed = state.market.current().await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "feed": feed,
            "ticker": feed.ticker_lines(),
        }))),
    )
}

async fn portfolio(Path(profile): Path<String>) -> (StatusCode, Json<ApiResponse>) {
    let allocation = RiskProfile::parse(&profile).allocation();
    (StatusCode::OK, Json(ApiResponse::success(allocation)))
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/transactions", post(record_transaction))
        .route("/api/smart-input", post(smart_input))
        .route("/api/chat", post(chat_handler))
        .route("/api/market", get(market))
        .route("/api/portfolio/:profile", get(portfolio))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    state: ApiState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
