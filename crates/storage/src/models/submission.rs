use chrono::NaiveDateTime;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use scoring::{ExerciseType, FormQuality, LiftInput, ScoringError, Sex};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A community-submitted lift. Scores are always re-derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
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
    pub is_processed: bool,
}

fn decimal_to_f64(decimal: Decimal) -> scoring::Result<f64> {
    decimal
        .to_f64()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ScoringError::UnrepresentableWeight(decimal.to_string()))
}

impl Submission {
    pub fn exercise(&self) -> scoring::Result<ExerciseType> {
        self.exercise_type.parse()
    }

    pub fn to_lift_input(&self) -> scoring::Result<LiftInput> {
        let sex: Sex = self.gender.parse()?;
        let form_quality: FormQuality = self.form_quality.parse()?;
        let reps = u32::try_from(self.reps)
            .map_err(|_| ScoringError::InvalidRepCount(i64::from(self.reps)))?;

        Ok(
            LiftInput::new(
                sex,
                decimal_to_f64(self.bodyweight)?,
                decimal_to_f64(self.added_weight)?,
                reps,
            )
            .with_form(form_quality, decimal_to_f64(self.penalty_weight)?),
        )
    }

    pub fn has_video(&self) -> bool {
        self.video_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::submission;
    use super::*;

    #[test]
    fn test_to_lift_input_applies_penalty() {
        let mut row = submission("Male", 75, 30, 3);
        row.form_quality = "Minor_Cheat".to_string();
        row.penalty_weight = Decimal::new(25, 1);

        let lift = row.to_lift_input().unwrap();
        assert_eq!(lift.sex, Sex::Male);
        assert_eq!(lift.reps, 3);
        assert_eq!(lift.adjusted_added_weight(), 27.5);
    }

    #[test]
    fn test_to_lift_input_rejects_bad_rows() {
        let mut row = submission("Male", 75, 30, 3);
        row.form_quality = "Good".to_string();
        assert!(row.to_lift_input().is_err());

        let row = submission("Male", 75, 30, -1);
        let err = row.to_lift_input().unwrap_err();
        assert_eq!(err, ScoringError::InvalidRepCount(-1));
        assert!(err.to_string().starts_with("reps out of range: -1"));
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(decimal_to_f64(Decimal::new(725, 1)), Ok(72.5));
        assert_eq!(decimal_to_f64(Decimal::ZERO), Ok(0.0));
        assert_eq!(decimal_to_f64(Decimal::new(-150, 1)), Ok(-15.0));
    }

    #[test]
    fn test_has_video() {
        let mut row = submission("Female", 60, 10, 1);
        assert!(!row.has_video());
        row.video_url = Some(String::new());
        assert!(!row.has_video());
        row.video_url = Some("https://example.com/clip".to_string());
        assert!(row.has_video());
    }
}
