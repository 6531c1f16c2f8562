use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use scoring::FormulaVersion;
use storage::{
    Database,
    dto::score::{
        AchievableRepsRequest, DayMaxRequest, DayMaxResponse, RequiredWeightRequest,
        ReverseCalculationResponse,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/calculator/required-weight",
    request_body = RequiredWeightRequest,
    responses(
        (status = 200, description = "Added weight needed for the target", body = ReverseCalculationResponse),
        (status = 400, description = "Invalid request or unreachable target"),
        (status = 404, description = "Formula not found for specified gender")
    ),
    tag = "calculator"
)]
pub async fn required_weight(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    payload: Result<Json<RequiredWeightRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let response = services::required_weight(db.pool(), &payload, version).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculator/achievable-reps",
    request_body = AchievableRepsRequest,
    responses(
        (status = 200, description = "Reps needed for the target", body = ReverseCalculationResponse),
        (status = 400, description = "Invalid request or weight already at the target"),
        (status = 404, description = "Formula not found for specified gender")
    ),
    tag = "calculator"
)]
pub async fn achievable_reps(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    payload: Result<Json<AchievableRepsRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let response = services::achievable_reps(db.pool(), &payload, version).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculator/day-max",
    request_body = DayMaxRequest,
    responses(
        (status = 200, description = "Estimated best single of the session", body = DayMaxResponse),
        (status = 400, description = "Invalid request or no effort data")
    ),
    tag = "calculator"
)]
pub async fn day_max(
    payload: Result<Json<DayMaxRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let response = services::day_max(&payload)?;

    Ok(Json(response).into_response())
}
