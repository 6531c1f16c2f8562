use scoring::{FormulaVersion, estimate_day_max};
use sqlx::PgPool;
use storage::dto::score::{
    AchievableRepsRequest, DayMaxRequest, DayMaxResponse, RequiredWeightRequest,
    ReverseCalculationResponse,
};

use crate::error::WebResult;
use crate::features::formulas::services::formula_for;

/// Added weight needed at the requested reps to reach the target 1RM
pub async fn required_weight(
    pool: &PgPool,
    req: &RequiredWeightRequest,
    version: FormulaVersion,
) -> WebResult<ReverseCalculationResponse> {
    let target = req.to_target()?;
    let formula = formula_for(pool, target.sex, target.exercise, version).await?;

    let result = target.required_weight(req.reps, formula.as_ref())?;

    Ok(result.into())
}

/// Reps needed at the given added weight to reach the target 1RM
pub async fn achievable_reps(
    pool: &PgPool,
    req: &AchievableRepsRequest,
    version: FormulaVersion,
) -> WebResult<ReverseCalculationResponse> {
    let target = req.to_target()?;
    let formula = formula_for(pool, target.sex, target.exercise, version).await?;

    let result = target.achievable_reps(req.added_weight, formula.as_ref())?;
    let whole_reps = target.achievable_whole_reps(req.added_weight)?;

    Ok(ReverseCalculationResponse {
        whole_reps: Some(whole_reps),
        ..ReverseCalculationResponse::from(result)
    })
}

pub fn day_max(req: &DayMaxRequest) -> WebResult<DayMaxResponse> {
    let input = req.to_input()?;
    let estimate = estimate_day_max(&input)?;

    Ok(estimate.into())
}
