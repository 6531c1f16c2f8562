use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" => Ok(Self::Male),
            "FEMALE" | "F" => Ok(Self::Female),
            _ => Err(ScoringError::unknown("gender", s)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movements that can be scored.
///
/// Calisthenics movements count bodyweight as part of the lifted load and are
/// normalized with the community polynomial; barbell movements score the bar
/// load alone against the DOTS coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    WeightedPullup,
    WeightedDips,
    Squat,
    Bench,
    Deadlift,
    StrictPress,
    BarbellCurl,
}

impl ExerciseType {
    pub fn all() -> &'static [ExerciseType] {
        &[
            Self::WeightedPullup,
            Self::WeightedDips,
            Self::Squat,
            Self::Bench,
            Self::Deadlift,
            Self::StrictPress,
            Self::BarbellCurl,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightedPullup => "weighted_pullup",
            Self::WeightedDips => "weighted_dips",
            Self::Squat => "squat",
            Self::Bench => "bench",
            Self::Deadlift => "deadlift",
            Self::StrictPress => "strict_press",
            Self::BarbellCurl => "barbell_curl",
        }
    }

    pub fn is_calisthenics(&self) -> bool {
        matches!(self, Self::WeightedPullup | Self::WeightedDips)
    }
}

impl FromStr for ExerciseType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|exercise| exercise.as_str() == s.trim())
            .ok_or_else(|| ScoringError::unknown("exercise type", s))
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormQuality {
    #[default]
    Competition,
    #[serde(rename = "Minor_Cheat")]
    MinorCheat,
    #[serde(rename = "Major_Cheat")]
    MajorCheat,
    #[serde(rename = "Extreme_Cheat")]
    ExtremeCheat,
}

impl FormQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Competition => "Competition",
            Self::MinorCheat => "Minor_Cheat",
            Self::MajorCheat => "Major_Cheat",
            Self::ExtremeCheat => "Extreme_Cheat",
        }
    }

    /// Inclusive penalty range in kg, `None` when no penalty applies.
    pub fn penalty_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Competition => None,
            Self::MinorCheat => Some((2.0, 5.0)),
            Self::MajorCheat => Some((5.0, 20.0)),
            Self::ExtremeCheat => Some((20.0, 50.0)),
        }
    }

    pub fn validate_penalty(&self, penalty_kg: f64) -> Result<()> {
        match self.penalty_range() {
            Some((min, max)) if !(min..=max).contains(&penalty_kg) => {
                Err(ScoringError::PenaltyOutOfRange {
                    penalty: penalty_kg,
                    min,
                    max,
                })
            }
            _ => Ok(()),
        }
    }

    /// Penalty actually deducted from the lifted weight.
    pub fn effective_penalty(&self, penalty_kg: f64) -> f64 {
        match self {
            Self::Competition => 0.0,
            _ => penalty_kg,
        }
    }
}

impl FromStr for FormQuality {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Competition" => Ok(Self::Competition),
            "Minor_Cheat" => Ok(Self::MinorCheat),
            "Major_Cheat" => Ok(Self::MajorCheat),
            "Extreme_Cheat" => Ok(Self::ExtremeCheat),
            _ => Err(ScoringError::unknown("form quality", s)),
        }
    }
}

impl fmt::Display for FormQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PullupGrip {
    Overhand,
    Underhand,
}

impl PullupGrip {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overhand => "Overhand",
            Self::Underhand => "Underhand",
        }
    }
}

impl FromStr for PullupGrip {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Overhand" => Ok(Self::Overhand),
            "Underhand" => Ok(Self::Underhand),
            _ => Err(ScoringError::unknown("pull-up grip", s)),
        }
    }
}

/// Rest taken between sets of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestInterval {
    Short,
    Moderate,
    Long,
    VeryLong,
}

impl RestInterval {
    /// Scales how quickly fatigue accumulates across sets.
    pub fn fatigue_multiplier(&self) -> f64 {
        match self {
            Self::Short => 1.6,
            Self::Moderate => 1.25,
            Self::Long => 1.0,
            Self::VeryLong => 0.85,
        }
    }
}

impl FromStr for RestInterval {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "short" => Ok(Self::Short),
            "moderate" => Ok(Self::Moderate),
            "long" => Ok(Self::Long),
            "very_long" => Ok(Self::VeryLong),
            _ => Err(ScoringError::unknown("rest interval", s)),
        }
    }
}

/// How hard a set was, as reported by the lifter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Effort {
    /// Reps left in the tank when the set was stopped.
    #[serde(alias = "RIR")]
    Rir(u32),
    /// Reps completed when the set was taken to failure.
    AchievedReps(u32),
}

impl Effort {
    /// Rep count the set would have reached at failure.
    pub fn reps_to_failure(&self, prescribed_reps: u32) -> u32 {
        match *self {
            Self::Rir(rir) => prescribed_reps.saturating_add(rir),
            Self::AchievedReps(reps) => reps,
        }
    }
}

/// One performed lift as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftInput {
    pub sex: Sex,
    pub bodyweight_kg: f64,
    /// External load; for barbell movements this is the bar weight.
    pub added_weight_kg: f64,
    pub reps: u32,
    pub form_quality: FormQuality,
    pub penalty_weight_kg: f64,
}

impl LiftInput {
    pub fn new(sex: Sex, bodyweight_kg: f64, added_weight_kg: f64, reps: u32) -> Self {
        Self {
            sex,
            bodyweight_kg,
            added_weight_kg,
            reps,
            form_quality: FormQuality::Competition,
            penalty_weight_kg: 0.0,
        }
    }

    pub fn with_form(mut self, form_quality: FormQuality, penalty_weight_kg: f64) -> Self {
        self.form_quality = form_quality;
        self.penalty_weight_kg = penalty_weight_kg;
        self
    }

    /// Added weight after the form penalty has been deducted.
    pub fn adjusted_added_weight(&self) -> f64 {
        self.added_weight_kg - self.form_quality.effective_penalty(self.penalty_weight_kg)
    }
}

/// Output of a single scoring calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Estimated 1RM of the external load (added weight or bar weight).
    pub estimated_1rm: f64,
    pub final_score: f64,
    pub coefficient: f64,
    /// Estimated 1RM of everything moved, bodyweight included for calisthenics.
    pub total_1rm: f64,
    pub adjusted_added_weight: f64,
    pub computed_added_weight: Option<f64>,
    pub computed_reps: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parsing_accepts_short_forms() {
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_exercise_type_round_trips_through_str() {
        for exercise in ExerciseType::all() {
            assert_eq!(exercise.as_str().parse::<ExerciseType>().unwrap(), *exercise);
        }
        assert!("muscle_up".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn test_penalty_ranges() {
        assert!(FormQuality::Competition.validate_penalty(100.0).is_ok());
        assert!(FormQuality::MinorCheat.validate_penalty(2.0).is_ok());
        assert!(FormQuality::MinorCheat.validate_penalty(5.0).is_ok());
        assert!(FormQuality::MinorCheat.validate_penalty(5.5).is_err());
        assert!(FormQuality::MajorCheat.validate_penalty(4.0).is_err());
        assert!(FormQuality::ExtremeCheat.validate_penalty(50.0).is_ok());
        assert!(FormQuality::ExtremeCheat.validate_penalty(51.0).is_err());
    }

    #[test]
    fn test_competition_ignores_penalty() {
        let lift = LiftInput::new(Sex::Male, 70.0, 20.0, 5).with_form(FormQuality::Competition, 3.0);
        assert_eq!(lift.adjusted_added_weight(), 20.0);

        let cheat = lift.with_form(FormQuality::MinorCheat, 3.0);
        assert_eq!(cheat.adjusted_added_weight(), 17.0);
    }

    #[test]
    fn test_effort_reps_to_failure() {
        assert_eq!(Effort::Rir(2).reps_to_failure(5), 7);
        assert_eq!(Effort::AchievedReps(6).reps_to_failure(5), 6);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&FormQuality::MinorCheat).unwrap(),
            "\"Minor_Cheat\""
        );
        assert_eq!(
            serde_json::to_string(&RestInterval::VeryLong).unwrap(),
            "\"very_long\""
        );
        let effort: Effort = serde_json::from_str(r#"{"type":"RIR","value":2}"#).unwrap();
        assert_eq!(effort, Effort::Rir(2));
    }
}
