//! Best single lift implied by a multi-set training session.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::one_rep_max::{REPS_EXCLUSIVE_MAX, relative_intensity};
use crate::types::{Effort, RestInterval};

/// Strength lost per rep of each preceding set, before the rest multiplier.
pub const FATIGUE_PER_REP: f64 = 0.005;

/// The last set is never assumed to be weaker than this share of the day's max.
pub const MIN_FATIGUE_AVAILABILITY: f64 = 0.75;

pub const FIRST_SET_WEIGHT: f64 = 0.8;
pub const LAST_SET_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayMaxInput {
    pub bodyweight_kg: f64,
    pub added_weight_kg: f64,
    pub penalty_weight_kg: f64,
    pub sets: u32,
    pub reps_per_set: u32,
    pub rest: RestInterval,
    pub first_set: Option<Effort>,
    pub last_set: Option<Effort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayMaxEstimate {
    pub first_set_1rm: Option<f64>,
    pub last_set_1rm: Option<f64>,
    pub fatigue_availability: f64,
    /// Estimated best single of the day, bodyweight included.
    pub total_1rm: f64,
    pub added_1rm: f64,
}

/// Share of the day's strength still available on the last set.
pub fn fatigue_availability(sets: u32, reps_per_set: u32, rest: RestInterval) -> f64 {
    let per_set_decay = reps_per_set as f64 * FATIGUE_PER_REP;
    let decay = sets.saturating_sub(1) as f64 * per_set_decay * rest.fatigue_multiplier();
    (1.0 - decay).max(MIN_FATIGUE_AVAILABILITY)
}

fn implied_1rm(working_weight: f64, effort: Effort, reps_per_set: u32) -> Result<f64> {
    let reps = effort.reps_to_failure(reps_per_set);
    Ok(working_weight / relative_intensity(reps)?)
}

pub fn estimate_day_max(input: &DayMaxInput) -> Result<DayMaxEstimate> {
    if !input.bodyweight_kg.is_finite() || input.bodyweight_kg <= 0.0 {
        return Err(ScoringError::NonPositiveBodyweight(input.bodyweight_kg));
    }
    if input.sets == 0 {
        return Err(ScoringError::InvalidSetCount(input.sets));
    }
    if input.reps_per_set == 0 || input.reps_per_set >= REPS_EXCLUSIVE_MAX {
        return Err(ScoringError::RepsOutOfRange(input.reps_per_set));
    }
    if input.first_set.is_none() && input.last_set.is_none() {
        return Err(ScoringError::InsufficientData);
    }

    let working = input.bodyweight_kg + input.added_weight_kg - input.penalty_weight_kg;
    if !working.is_finite() || working <= 0.0 {
        return Err(ScoringError::NonPositiveWeight(working));
    }

    let availability = fatigue_availability(input.sets, input.reps_per_set, input.rest);

    let first_set_1rm = input
        .first_set
        .map(|effort| implied_1rm(working, effort, input.reps_per_set))
        .transpose()?;
    let last_set_1rm = input
        .last_set
        .map(|effort| {
            implied_1rm(working, effort, input.reps_per_set).map(|fresh| fresh / availability)
        })
        .transpose()?;

    let total_1rm = match (first_set_1rm, last_set_1rm) {
        (Some(first), Some(last)) => FIRST_SET_WEIGHT * first + LAST_SET_WEIGHT * last,
        (Some(first), None) => first,
        (None, Some(last)) => last,
        (None, None) => return Err(ScoringError::InsufficientData),
    };

    Ok(DayMaxEstimate {
        first_set_1rm,
        last_set_1rm,
        fatigue_availability: availability,
        total_1rm,
        added_1rm: total_1rm - input.bodyweight_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn five_by_five() -> DayMaxInput {
        DayMaxInput {
            bodyweight_kg: 70.0,
            added_weight_kg: 20.0,
            penalty_weight_kg: 0.0,
            sets: 5,
            reps_per_set: 5,
            rest: RestInterval::Long,
            first_set: None,
            last_set: None,
        }
    }

    #[test]
    fn test_fatigue_availability() {
        assert!(approx_eq(fatigue_availability(5, 5, RestInterval::Long), 0.9, 1e-12));
        assert!(approx_eq(fatigue_availability(5, 5, RestInterval::Short), 0.84, 1e-12));
        assert!(approx_eq(fatigue_availability(5, 5, RestInterval::VeryLong), 0.915, 1e-12));
        assert_eq!(fatigue_availability(1, 10, RestInterval::Short), 1.0);
        assert_eq!(
            fatigue_availability(10, 10, RestInterval::Short),
            MIN_FATIGUE_AVAILABILITY
        );
    }

    #[test]
    fn test_first_set_only_is_used_unblended() {
        let input = DayMaxInput {
            first_set: Some(Effort::Rir(2)),
            ..five_by_five()
        };
        let estimate = estimate_day_max(&input).unwrap();
        let expected = 90.0 / relative_intensity(7).unwrap();

        assert_eq!(estimate.first_set_1rm, Some(expected));
        assert_eq!(estimate.last_set_1rm, None);
        assert_eq!(estimate.total_1rm, expected);
        assert!(approx_eq(estimate.added_1rm, expected - 70.0, 1e-12));
    }

    #[test]
    fn test_last_set_is_fatigue_adjusted() {
        let input = DayMaxInput {
            last_set: Some(Effort::AchievedReps(5)),
            ..five_by_five()
        };
        let estimate = estimate_day_max(&input).unwrap();
        let fresh = 90.0 / relative_intensity(5).unwrap();

        assert!(approx_eq(estimate.total_1rm, fresh / 0.9, 1e-9));
        assert!(estimate.total_1rm > fresh);
    }

    #[test]
    fn test_both_sets_blend_eighty_twenty() {
        let input = DayMaxInput {
            first_set: Some(Effort::Rir(3)),
            last_set: Some(Effort::Rir(0)),
            ..five_by_five()
        };
        let estimate = estimate_day_max(&input).unwrap();
        let first = estimate.first_set_1rm.unwrap();
        let last = estimate.last_set_1rm.unwrap();

        assert!(approx_eq(estimate.total_1rm, 0.8 * first + 0.2 * last, 1e-9));
    }

    #[test]
    fn test_penalty_lowers_working_weight() {
        let clean = DayMaxInput {
            first_set: Some(Effort::Rir(0)),
            ..five_by_five()
        };
        let penalized = DayMaxInput {
            penalty_weight_kg: 5.0,
            ..clean
        };
        let clean = estimate_day_max(&clean).unwrap();
        let penalized = estimate_day_max(&penalized).unwrap();
        assert!(penalized.total_1rm < clean.total_1rm);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            estimate_day_max(&five_by_five()),
            Err(ScoringError::InsufficientData)
        );
    }

    #[test]
    fn test_invalid_session_shapes() {
        let base = DayMaxInput {
            first_set: Some(Effort::Rir(1)),
            ..five_by_five()
        };
        assert_eq!(
            estimate_day_max(&DayMaxInput { sets: 0, ..base }),
            Err(ScoringError::InvalidSetCount(0))
        );
        assert_eq!(
            estimate_day_max(&DayMaxInput { reps_per_set: 37, ..base }),
            Err(ScoringError::RepsOutOfRange(37))
        );
        // 30 prescribed + 10 in reserve runs past the estimator's range.
        assert_eq!(
            estimate_day_max(&DayMaxInput {
                reps_per_set: 30,
                first_set: Some(Effort::Rir(10)),
                ..base
            }),
            Err(ScoringError::RepsOutOfRange(40))
        );
        assert!(matches!(
            estimate_day_max(&DayMaxInput {
                added_weight_kg: -90.0,
                ..base
            }),
            Err(ScoringError::NonPositiveWeight(_))
        ));
    }
}
