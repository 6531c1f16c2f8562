use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use scoring::FormulaVersion;
use storage::{
    Database,
    dto::formula::{FormulaResponse, UpdateFormulaRequest},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/formulas",
    responses(
        (status = 200, description = "Coefficients for every gender", body = Vec<FormulaResponse>)
    ),
    tag = "formulas"
)]
pub async fn list_formulas(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
) -> Result<Response, WebError> {
    let response = services::list_formulas(db.pool(), version).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/formulas/{gender}",
    params(
        ("gender" = String, Path, description = "Male or Female")
    ),
    responses(
        (status = 200, description = "Coefficients for one gender", body = FormulaResponse),
        (status = 400, description = "Unknown gender"),
        (status = 404, description = "No formula stored for this gender")
    ),
    tag = "formulas"
)]
pub async fn get_formula(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    Path(gender): Path<String>,
) -> Result<Response, WebError> {
    let formula = services::get_formula(db.pool(), &gender, version).await?;

    Ok(Json(formula).into_response())
}

#[utoipa::path(
    put,
    path = "/api/formulas/{gender}",
    params(
        ("gender" = String, Path, description = "Male or Female")
    ),
    request_body = UpdateFormulaRequest,
    responses(
        (status = 200, description = "Coefficients replaced", body = FormulaResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "formulas"
)]
pub async fn update_formula(
    State(db): State<Database>,
    State(version): State<FormulaVersion>,
    Path(gender): Path<String>,
    payload: Result<Json<UpdateFormulaRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let formula = services::update_formula(db.pool(), &gender, &payload, version).await?;

    Ok(Json(formula).into_response())
}
