use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scoring::FormulaVersion;
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        submission::{
            CreateSubmissionRequest, LeaderboardEntry, LeaderboardFilter, SubmissionResponse,
        },
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(LeaderboardFilter),
    responses(
        (status = 200, description = "Community leaderboard", body = PaginatedResponse<LeaderboardEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "submissions"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    Query(filter): Query<LeaderboardFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::get_leaderboard(db.pool(), &filter, version).await?;

    let response = PaginatedResponse::new(entries, filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission stored", body = SubmissionResponse),
        (status = 400, description = "Invalid request")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let submission = services::create_submission(db.pool(), &payload).await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}
