use crate::{blockchain::models::BalanceResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

// The handler function for the GET /has-balance/{address} endpoint.
// Logical failures are carried in the body; the status is always 200.
pub async fn has_balance_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> (StatusCode, Json<BalanceResult>) {
    info!("Checking balances for {}", address);
    let result = state.checker.check_balances(&address).await;
    (StatusCode::OK, Json(result))
}
