use scoring::{
    DayMaxEstimate, DayMaxInput, Effort, ExerciseType, FormQuality, LiftInput, RestInterval,
    ScoreResult, ScoringError, Sex, TargetLift,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{
    validate_exercise_type, validate_form_quality, validate_gender, validate_rest_interval,
};

fn exercise_or_default(exercise_type: &Option<String>) -> scoring::Result<ExerciseType> {
    exercise_type
        .as_deref()
        .map(|exercise| exercise.parse::<ExerciseType>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Request payload for scoring a single performed lift
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CalculateScoreRequest {
    #[validate(custom(function = "validate_gender"))]
    #[schema(example = "Male")]
    pub gender: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Bodyweight must be between 20 and 300 kg"))]
    pub bodyweight: f64,

    pub added_weight: f64,

    pub reps: u32,

    /// Defaults to `weighted_pullup`
    #[validate(custom(function = "validate_exercise_type"))]
    pub exercise_type: Option<String>,

    /// Defaults to `Competition`
    #[validate(custom(function = "validate_form_quality"))]
    pub form_quality: Option<String>,

    pub penalty_weight: Option<f64>,
}

impl CalculateScoreRequest {
    pub fn exercise(&self) -> scoring::Result<ExerciseType> {
        exercise_or_default(&self.exercise_type)
    }

    /// Parses the payload and checks the penalty against the form quality.
    pub fn to_lift_input(&self) -> scoring::Result<LiftInput> {
        let sex: Sex = self.gender.parse()?;
        let form_quality: FormQuality = self
            .form_quality
            .as_deref()
            .map(|quality| quality.parse::<FormQuality>())
            .transpose()?
            .unwrap_or_default();
        let penalty = self.penalty_weight.unwrap_or(0.0);
        form_quality.validate_penalty(penalty)?;

        Ok(LiftInput::new(sex, self.bodyweight, self.added_weight, self.reps)
            .with_form(form_quality, penalty))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculateScoreResponse {
    pub estimated_1rm: f64,
    pub final_score: f64,
    pub coefficient: f64,
    pub total_1rm: f64,
    pub adjusted_added_weight: f64,
}

impl From<ScoreResult> for CalculateScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            estimated_1rm: result.estimated_1rm,
            final_score: result.final_score,
            coefficient: result.coefficient,
            total_1rm: result.total_1rm,
            adjusted_added_weight: result.adjusted_added_weight,
        }
    }
}

/// Request payload for the added weight needed to reach a target 1RM
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RequiredWeightRequest {
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Bodyweight must be between 20 and 300 kg"))]
    pub bodyweight: f64,

    pub target_added_1rm: f64,

    pub reps: u32,

    #[validate(custom(function = "validate_exercise_type"))]
    pub exercise_type: Option<String>,
}

impl RequiredWeightRequest {
    pub fn to_target(&self) -> scoring::Result<TargetLift> {
        Ok(TargetLift {
            sex: self.gender.parse()?,
            bodyweight_kg: self.bodyweight,
            exercise: exercise_or_default(&self.exercise_type)?,
            target_added_1rm: self.target_added_1rm,
        })
    }
}

/// Request payload for the reps needed at a given weight to reach a target 1RM
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AchievableRepsRequest {
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Bodyweight must be between 20 and 300 kg"))]
    pub bodyweight: f64,

    pub target_added_1rm: f64,

    pub added_weight: f64,

    #[validate(custom(function = "validate_exercise_type"))]
    pub exercise_type: Option<String>,
}

impl AchievableRepsRequest {
    pub fn to_target(&self) -> scoring::Result<TargetLift> {
        Ok(TargetLift {
            sex: self.gender.parse()?,
            bodyweight_kg: self.bodyweight,
            exercise: exercise_or_default(&self.exercise_type)?,
            target_added_1rm: self.target_added_1rm,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReverseCalculationResponse {
    pub estimated_1rm: f64,
    pub final_score: f64,
    pub coefficient: f64,
    pub total_1rm: f64,
    pub computed_added_weight: Option<f64>,
    pub computed_reps: Option<f64>,
    pub whole_reps: Option<u32>,
}

impl From<ScoreResult> for ReverseCalculationResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            estimated_1rm: result.estimated_1rm,
            final_score: result.final_score,
            coefficient: result.coefficient,
            total_1rm: result.total_1rm,
            computed_added_weight: result.computed_added_weight,
            computed_reps: result.computed_reps,
            whole_reps: None,
        }
    }
}

/// Self-reported effort on a set: `rir` (reps in reserve) or `achieved_reps`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EffortPayload {
    #[serde(rename = "type")]
    #[schema(example = "rir")]
    pub kind: String,
    pub value: u32,
}

impl EffortPayload {
    pub fn to_effort(&self) -> scoring::Result<Effort> {
        match self.kind.trim().to_lowercase().as_str() {
            "rir" => Ok(Effort::Rir(self.value)),
            "achieved_reps" => Ok(Effort::AchievedReps(self.value)),
            _ => Err(ScoringError::UnknownValue {
                kind: "effort type",
                value: self.kind.clone(),
            }),
        }
    }
}

/// Request payload for estimating the best single of a training session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DayMaxRequest {
    #[validate(range(min = 20.0, max = 300.0, message = "Bodyweight must be between 20 and 300 kg"))]
    pub bodyweight: f64,

    pub added_weight: f64,

    /// When present, the penalty must fall in this quality's range
    #[validate(custom(function = "validate_form_quality"))]
    pub form_quality: Option<String>,

    #[validate(range(min = 0.0, max = 50.0, message = "Penalty must be between 0 and 50 kg"))]
    pub penalty_weight: Option<f64>,

    #[validate(range(min = 1, max = 20, message = "Sets must be between 1 and 20"))]
    pub sets: u32,

    pub reps_per_set: u32,

    #[validate(custom(function = "validate_rest_interval"))]
    #[schema(example = "long")]
    pub rest: String,

    pub first_set: Option<EffortPayload>,

    pub last_set: Option<EffortPayload>,
}

impl DayMaxRequest {
    /// Penalty after the quality check; without a quality only the 0-50 kg bound applies.
    fn penalty(&self) -> scoring::Result<f64> {
        let penalty = self.penalty_weight.unwrap_or(0.0);
        match self.form_quality.as_deref() {
            Some(quality) => {
                let quality = quality.parse::<FormQuality>()?;
                quality.validate_penalty(penalty)?;
                Ok(quality.effective_penalty(penalty))
            }
            None => Ok(penalty),
        }
    }

    pub fn to_input(&self) -> scoring::Result<DayMaxInput> {
        Ok(DayMaxInput {
            bodyweight_kg: self.bodyweight,
            added_weight_kg: self.added_weight,
            penalty_weight_kg: self.penalty()?,
            sets: self.sets,
            reps_per_set: self.reps_per_set,
            rest: self.rest.parse::<RestInterval>()?,
            first_set: self.first_set.as_ref().map(EffortPayload::to_effort).transpose()?,
            last_set: self.last_set.as_ref().map(EffortPayload::to_effort).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DayMaxResponse {
    pub first_set_1rm: Option<f64>,
    pub last_set_1rm: Option<f64>,
    pub fatigue_availability: f64,
    pub total_1rm: f64,
    pub added_1rm: f64,
}

impl From<DayMaxEstimate> for DayMaxResponse {
    fn from(estimate: DayMaxEstimate) -> Self {
        Self {
            first_set_1rm: estimate.first_set_1rm,
            last_set_1rm: estimate.last_set_1rm,
            fatigue_availability: estimate.fatigue_availability,
            total_1rm: estimate.total_1rm,
            added_1rm: estimate.added_1rm,
        }
    }
}
