use crate::coefficient::{FormulaCoefficients, bench_ratio_multiplier, lift_coefficient};
use crate::error::{Result, ScoringError};
use crate::one_rep_max::{
    estimate_total_1rm, invert_weight_for_target_1rm, solve_reps_for_target_1rm,
    solve_whole_reps_for_target_1rm,
};
use crate::types::{ExerciseType, LiftInput, ScoreResult, Sex};

/// Weighted dips scores are divided by this to sit on the pull-up scale.
pub const DIPS_SCORE_DIVISOR: f64 = 1.3;

/// Fixed per-exercise factor applied after `total_1rm × coefficient`.
pub fn post_scale(exercise: ExerciseType) -> f64 {
    match exercise {
        ExerciseType::WeightedDips => 1.0 / DIPS_SCORE_DIVISOR,
        other => bench_ratio_multiplier(other),
    }
}

pub fn compute_final_score(total_1rm: f64, coefficient: f64, exercise: ExerciseType) -> f64 {
    total_1rm * coefficient * post_scale(exercise)
}

/// Everything that moves in the lift: bodyweight plus added weight for
/// calisthenics, the bar alone otherwise.
fn moved_weight(exercise: ExerciseType, bodyweight: f64, external: f64) -> f64 {
    if exercise.is_calisthenics() {
        bodyweight + external
    } else {
        external
    }
}

fn external_weight(exercise: ExerciseType, bodyweight: f64, moved: f64) -> f64 {
    if exercise.is_calisthenics() {
        moved - bodyweight
    } else {
        moved
    }
}

fn check_bodyweight(bodyweight: f64) -> Result<()> {
    if !bodyweight.is_finite() || bodyweight <= 0.0 {
        return Err(ScoringError::NonPositiveBodyweight(bodyweight));
    }
    Ok(())
}

/// Scores a performed lift. The form penalty is expected to be validated already.
pub fn score_lift(
    lift: &LiftInput,
    exercise: ExerciseType,
    formula: Option<&FormulaCoefficients>,
) -> Result<ScoreResult> {
    let total_1rm = estimate_lift_total_1rm(lift, exercise)?;
    let coefficient = lift_coefficient(exercise, lift.sex, lift.bodyweight_kg, formula)?;

    Ok(ScoreResult {
        estimated_1rm: external_weight(exercise, lift.bodyweight_kg, total_1rm),
        final_score: compute_final_score(total_1rm, coefficient, exercise),
        coefficient,
        total_1rm,
        adjusted_added_weight: lift.adjusted_added_weight(),
        computed_added_weight: None,
        computed_reps: None,
    })
}

/// Total 1RM of a lift after penalties; needs no formula.
pub fn estimate_lift_total_1rm(lift: &LiftInput, exercise: ExerciseType) -> Result<f64> {
    check_bodyweight(lift.bodyweight_kg)?;
    let total_weight = moved_weight(exercise, lift.bodyweight_kg, lift.adjusted_added_weight());
    estimate_total_1rm(total_weight, lift.reps)
}

/// External-load 1RM of a lift (added weight or bar weight) after penalties.
pub fn estimate_lift_added_1rm(lift: &LiftInput, exercise: ExerciseType) -> Result<f64> {
    let total_1rm = estimate_lift_total_1rm(lift, exercise)?;
    Ok(external_weight(exercise, lift.bodyweight_kg, total_1rm))
}

/// A 1RM goal, expressed in external load, for the reverse calculators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLift {
    pub sex: Sex,
    pub bodyweight_kg: f64,
    pub exercise: ExerciseType,
    pub target_added_1rm: f64,
}

impl TargetLift {
    pub fn target_total_1rm(&self) -> Result<f64> {
        check_bodyweight(self.bodyweight_kg)?;
        let total = moved_weight(self.exercise, self.bodyweight_kg, self.target_added_1rm);
        if !total.is_finite() || total <= 0.0 {
            return Err(ScoringError::NonPositiveWeight(total));
        }
        Ok(total)
    }

    fn score(&self, formula: Option<&FormulaCoefficients>) -> Result<ScoreResult> {
        let total_1rm = self.target_total_1rm()?;
        let coefficient =
            lift_coefficient(self.exercise, self.sex, self.bodyweight_kg, formula)?;

        Ok(ScoreResult {
            estimated_1rm: self.target_added_1rm,
            final_score: compute_final_score(total_1rm, coefficient, self.exercise),
            coefficient,
            total_1rm,
            adjusted_added_weight: self.target_added_1rm,
            computed_added_weight: None,
            computed_reps: None,
        })
    }

    /// Added weight to lift for `reps` so that the session hits the target.
    pub fn required_weight(
        &self,
        reps: u32,
        formula: Option<&FormulaCoefficients>,
    ) -> Result<ScoreResult> {
        let mut result = self.score(formula)?;
        let working = invert_weight_for_target_1rm(result.total_1rm, reps)?;
        let added = external_weight(self.exercise, self.bodyweight_kg, working);

        result.adjusted_added_weight = added;
        result.computed_added_weight = Some(added);
        Ok(result)
    }

    /// Continuous reps needed at `added_weight` to reach the target.
    pub fn achievable_reps(
        &self,
        added_weight: f64,
        formula: Option<&FormulaCoefficients>,
    ) -> Result<ScoreResult> {
        let mut result = self.score(formula)?;
        let working = moved_weight(self.exercise, self.bodyweight_kg, added_weight);
        let reps = solve_reps_for_target_1rm(result.total_1rm, working)?;

        result.adjusted_added_weight = added_weight;
        result.computed_reps = Some(reps);
        Ok(result)
    }

    /// Whole-rep counterpart of [`TargetLift::achievable_reps`].
    pub fn achievable_whole_reps(&self, added_weight: f64) -> Result<u32> {
        let total = self.target_total_1rm()?;
        let working = moved_weight(self.exercise, self.bodyweight_kg, added_weight);
        solve_whole_reps_for_target_1rm(total, working)
    }
}
