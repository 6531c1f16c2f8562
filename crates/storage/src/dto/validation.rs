use std::str::FromStr;

use scoring::{ExerciseType, FormQuality, PullupGrip, RestInterval, Sex};
use validator::ValidationError;

fn parses<T: FromStr>(value: &str, code: &'static str) -> Result<(), ValidationError> {
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|_| ValidationError::new(code))
}

pub(crate) fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    parses::<Sex>(gender, "invalid_gender")
}

pub(crate) fn validate_exercise_type(exercise: &str) -> Result<(), ValidationError> {
    parses::<ExerciseType>(exercise, "invalid_exercise_type")
}

pub(crate) fn validate_form_quality(quality: &str) -> Result<(), ValidationError> {
    parses::<FormQuality>(quality, "invalid_form_quality")
}

pub(crate) fn validate_pullup_type(grip: &str) -> Result<(), ValidationError> {
    parses::<PullupGrip>(grip, "invalid_pullup_type")
}

pub(crate) fn validate_rest_interval(rest: &str) -> Result<(), ValidationError> {
    parses::<RestInterval>(rest, "invalid_rest_interval")
}

/// `None` and the catch-all `"all"` both mean "no filter".
pub(crate) fn active_filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
