use std::collections::HashMap;

use scoring::{ExerciseType, FormulaCoefficients, FormulaVersion, Sex};
use sqlx::PgPool;
use storage::{
    dto::formula::{FormulaResponse, UpdateFormulaRequest},
    error::StorageError,
    repository::formula::FormulaRepository,
};

use crate::error::WebResult;

/// List the stored coefficients for every gender
pub async fn list_formulas(pool: &PgPool, version: FormulaVersion) -> WebResult<Vec<FormulaResponse>> {
    let repo = FormulaRepository::new(pool);
    let formulas = repo.list_all().await?;

    Ok(formulas
        .into_iter()
        .map(|f| FormulaResponse::from_record(f, version.as_str()))
        .collect())
}

pub async fn get_formula(
    pool: &PgPool,
    gender: &str,
    version: FormulaVersion,
) -> WebResult<FormulaResponse> {
    let sex: Sex = gender.parse()?;
    let repo = FormulaRepository::new(pool);
    let formula = repo.get_by_gender(sex.as_str()).await?;

    Ok(FormulaResponse::from_record(formula, version.as_str()))
}

pub async fn update_formula(
    pool: &PgPool,
    gender: &str,
    req: &UpdateFormulaRequest,
    version: FormulaVersion,
) -> WebResult<FormulaResponse> {
    let sex: Sex = gender.parse()?;
    let repo = FormulaRepository::new(pool);
    let formula = repo.upsert(sex.as_str(), req).await?;

    tracing::info!(
        gender = sex.as_str(),
        total_submissions_used = formula.total_submissions_used,
        "Formula coefficients updated"
    );

    Ok(FormulaResponse::from_record(formula, version.as_str()))
}

/// Coefficients needed to score `exercise` for `sex`.
///
/// Barbell movements use DOTS and never touch the database. A missing row
/// yields `None`, which scoring reports as an unavailable formula.
pub async fn formula_for(
    pool: &PgPool,
    sex: Sex,
    exercise: ExerciseType,
    version: FormulaVersion,
) -> WebResult<Option<FormulaCoefficients>> {
    if !exercise.is_calisthenics() {
        return Ok(None);
    }

    let repo = FormulaRepository::new(pool);
    match repo.get_by_gender(sex.as_str()).await {
        Ok(record) => Ok(Some(record.to_coefficients(version)?)),
        Err(StorageError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All usable formulas keyed by sex. Rows with an unrecognised gender are skipped.
pub async fn formulas_by_sex(
    pool: &PgPool,
    version: FormulaVersion,
) -> WebResult<HashMap<Sex, FormulaCoefficients>> {
    let repo = FormulaRepository::new(pool);
    let records = repo.list_all().await?;

    Ok(records
        .iter()
        .filter_map(|record| match record.to_coefficients(version) {
            Ok(formula) => Some((formula.sex, formula)),
            Err(e) => {
                tracing::warn!(gender = %record.gender, "Skipping stored formula: {}", e);
                None
            }
        })
        .collect())
}
