use axum::{Router, routing::get};

use super::handlers::{create_submission, get_leaderboard};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_leaderboard).post(create_submission))
}
