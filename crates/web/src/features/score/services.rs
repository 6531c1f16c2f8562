use scoring::{FormulaVersion, score_lift};
use sqlx::PgPool;
use storage::dto::score::{CalculateScoreRequest, CalculateScoreResponse};

use crate::error::WebResult;
use crate::features::formulas::services::formula_for;

/// Score one performed lift against the stored formula for the lifter's gender
pub async fn calculate_score(
    pool: &PgPool,
    req: &CalculateScoreRequest,
    version: FormulaVersion,
) -> WebResult<CalculateScoreResponse> {
    let lift = req.to_lift_input()?;
    let exercise = req.exercise()?;
    let formula = formula_for(pool, lift.sex, exercise, version).await?;

    let result = score_lift(&lift, exercise, formula.as_ref())?;
    tracing::debug!(
        exercise = exercise.as_str(),
        final_score = result.final_score,
        "Lift scored"
    );

    Ok(result.into())
}
