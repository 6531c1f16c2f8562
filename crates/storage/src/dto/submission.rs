use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use scoring::{ExerciseType, FormQuality, PullupGrip, Sex};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::PaginationParams;
use super::validation::{
    active_filter, validate_exercise_type, validate_form_quality, validate_gender,
    validate_pullup_type,
};
use crate::models::Submission;

/// Request payload for submitting a lift to the community board
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_submission"))]
pub struct CreateSubmissionRequest {
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Bodyweight must be between 20 and 300 kg"))]
    pub bodyweight: f64,

    #[validate(range(min = -200.0, max = 500.0, message = "Added weight must be between -200 and 500 kg"))]
    pub added_weight: f64,

    #[validate(range(min = 1, max = 36, message = "Reps must be between 1 and 36"))]
    pub reps: i32,

    #[validate(custom(function = "validate_form_quality"))]
    pub form_quality: String,

    #[serde(default)]
    pub penalty_weight: f64,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub user_name: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub video_url: Option<String>,

    #[validate(custom(function = "validate_pullup_type"))]
    pub pullup_type: Option<String>,

    #[validate(custom(function = "validate_exercise_type"))]
    pub exercise_type: String,
}

impl CreateSubmissionRequest {
    /// Penalty as it should be stored: zero for competition-quality reps.
    pub fn stored_penalty(&self) -> f64 {
        self.form_quality
            .parse::<FormQuality>()
            .map(|quality| quality.effective_penalty(self.penalty_weight))
            .unwrap_or(0.0)
    }

    /// Canonical spelling of the gender (`m`, ` female ` become `Male`, `Female`).
    pub fn stored_gender(&self) -> scoring::Result<&'static str> {
        Ok(self.gender.parse::<Sex>()?.as_str())
    }

    pub fn stored_exercise_type(&self) -> scoring::Result<&'static str> {
        Ok(self.exercise_type.parse::<ExerciseType>()?.as_str())
    }

    pub fn stored_form_quality(&self) -> scoring::Result<&'static str> {
        Ok(self.form_quality.parse::<FormQuality>()?.as_str())
    }

    /// Grip is only meaningful for pull-ups and is dropped otherwise.
    pub fn stored_pullup_type(&self) -> scoring::Result<Option<&'static str>> {
        if self.exercise_type.parse::<ExerciseType>()? != ExerciseType::WeightedPullup {
            return Ok(None);
        }
        self.pullup_type
            .as_deref()
            .map(|grip| grip.parse::<PullupGrip>().map(|grip| grip.as_str()))
            .transpose()
    }
}

fn validate_submission(request: &CreateSubmissionRequest) -> Result<(), ValidationError> {
    if let Ok(quality) = request.form_quality.parse::<FormQuality>()
        && let Err(e) = quality.validate_penalty(request.penalty_weight)
    {
        let mut error = ValidationError::new("penalty_out_of_range");
        error.message = Some(e.to_string().into());
        return Err(error);
    }

    if request.bodyweight + request.added_weight - request.stored_penalty() <= 0.0
        && request
            .exercise_type
            .parse::<ExerciseType>()
            .is_ok_and(|exercise| exercise.is_calisthenics())
    {
        let mut error = ValidationError::new("non_positive_load");
        error.message = Some("Assistance cannot exceed bodyweight".into());
        return Err(error);
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub created_at: NaiveDateTime,
    pub gender: String,
    pub bodyweight: Decimal,
    pub added_weight: Decimal,
    pub reps: i32,
    pub form_quality: String,
    pub penalty_weight: Decimal,
    pub user_name: Option<String>,
    pub video_url: Option<String>,
    pub pullup_type: Option<String>,
    pub exercise_type: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            submission_id: submission.submission_id,
            created_at: submission.created_at,
            gender: submission.gender,
            bodyweight: submission.bodyweight,
            added_weight: submission.added_weight,
            reps: submission.reps,
            form_quality: submission.form_quality,
            penalty_weight: submission.penalty_weight,
            user_name: submission.user_name,
            video_url: submission.video_url,
            pullup_type: submission.pullup_type,
            exercise_type: submission.exercise_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    Date,
    #[default]
    Weight,
    Score,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LeaderboardFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub exercise_type: Option<String>,
    pub gender: Option<String>,
    pub pullup_type: Option<String>,
    pub form_quality: Option<String>,
    /// `with_video` or `without_video`
    pub has_video: Option<String>,
    /// Case-insensitive substring of the user name
    pub search: Option<String>,
    #[serde(default)]
    pub sort: LeaderboardSort,
}

impl LeaderboardFilter {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        let enum_filters = [
            ("exercise_type", &self.exercise_type, self.exercise_type()),
            ("gender", &self.gender, self.gender()),
            ("pullup_type", &self.pullup_type, self.pullup_type()),
            ("form_quality", &self.form_quality, self.form_quality()),
        ];
        for (name, raw, parsed) in enum_filters {
            if let Some(raw) = active_filter(raw)
                && parsed.is_none()
            {
                return Err(format!("unknown {name} '{raw}'"));
            }
        }

        if let Some(video) = self.has_video()
            && video != "with_video"
            && video != "without_video"
        {
            return Err("has_video must be 'with_video' or 'without_video'".to_string());
        }

        Ok(())
    }

    /// Enum filters resolve to the canonical spelling `create` stores.
    pub fn exercise_type(&self) -> Option<&'static str> {
        let exercise = active_filter(&self.exercise_type)?.parse::<ExerciseType>().ok()?;
        Some(exercise.as_str())
    }

    pub fn gender(&self) -> Option<&'static str> {
        let sex = active_filter(&self.gender)?.parse::<Sex>().ok()?;
        Some(sex.as_str())
    }

    pub fn pullup_type(&self) -> Option<&'static str> {
        let grip = active_filter(&self.pullup_type)?.parse::<PullupGrip>().ok()?;
        Some(grip.as_str())
    }

    pub fn form_quality(&self) -> Option<&'static str> {
        let quality = active_filter(&self.form_quality)?.parse::<FormQuality>().ok()?;
        Some(quality.as_str())
    }

    pub fn has_video(&self) -> Option<&str> {
        active_filter(&self.has_video)
    }

    pub fn search(&self) -> Option<&str> {
        active_filter(&self.search)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub submission: SubmissionResponse,
    /// Estimated 1RM of the added weight after penalties; null when it cannot be derived
    pub estimated_1rm: Option<f64>,
    pub final_score: Option<f64>,
}

pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .unwrap_or_default()
}
