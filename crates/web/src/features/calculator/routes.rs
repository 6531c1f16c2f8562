use axum::{Router, routing::post};

use super::handlers::{achievable_reps, day_max, required_weight};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/required-weight", post(required_weight))
        .route("/achievable-reps", post(achievable_reps))
        .route("/day-max", post(day_max))
}
