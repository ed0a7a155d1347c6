use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthOutput {
    pub status: &'static str,
    /// Networks queried by `has-balance`, in reporting order
    pub networks: Vec<String>,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthOutput> {
    Json(HealthOutput {
        status: "ok",
        networks: state
            .checker
            .registry()
            .names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
