use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use scoring::FormulaVersion;
use storage::{
    Database,
    dto::score::{CalculateScoreRequest, CalculateScoreResponse},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/calculate-score",
    request_body = CalculateScoreRequest,
    responses(
        (status = 200, description = "Lift scored", body = CalculateScoreResponse),
        (status = 400, description = "Invalid request or impossible lift"),
        (status = 404, description = "Formula not found for specified gender")
    ),
    tag = "score"
)]
pub async fn calculate_score(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    payload: Result<Json<CalculateScoreRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let response = services::calculate_score(db.pool(), &payload, version).await?;

    Ok(Json(response).into_response())
}
