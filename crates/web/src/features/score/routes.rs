use axum::{Router, routing::post};

use super::handlers::calculate_score;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/calculate-score", post(calculate_score))
}
