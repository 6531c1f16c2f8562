//! Bodyweight normalization coefficients.
//!
//! Calisthenics movements use a community-fitted polynomial whose parameters
//! are supplied from outside; barbell movements use the public DOTS constants.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::types::{ExerciseType, Sex};

/// Numerator shared by DOTS and the bench-ratio rescaling.
pub const SCORE_SCALE: f64 = 500.0;

/// DOTS score of a strong bench press, used as the anchor for bench-relative movements.
pub const BENCH_REFERENCE_DOTS: f64 = 130.0;
pub const STRICT_PRESS_TO_BENCH_RATIO: f64 = 0.65;
pub const BARBELL_CURL_TO_BENCH_RATIO: f64 = 0.50;

/// DOTS denominator constants, highest power first.
mod dots {
    pub const MALE: [f64; 5] = [
        -0.0000010930,
        0.0007391293,
        -0.1918759221,
        24.0900756,
        -307.75076,
    ];
    pub const FEMALE: [f64; 5] = [
        -0.0000010706,
        0.0005158568,
        -0.1126655495,
        13.6175032,
        -57.96288,
    ];
}

/// Which polynomial shape the stored coefficients describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaVersion {
    /// `b·W⁴ + c·W³ + d·W² + e·W + f`; `coeff_a` is ignored.
    #[default]
    Current,
    /// Adds the `a·W⁵` term used by the first published calculator.
    LegacyQuintic,
}

impl FormulaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::LegacyQuintic => "legacy_quintic",
        }
    }
}

impl std::str::FromStr for FormulaVersion {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy_quintic" => Ok(Self::LegacyQuintic),
            _ => Err(ScoringError::unknown("formula version", s)),
        }
    }
}

/// Community-fitted polynomial for one sex, treated as an opaque parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaCoefficients {
    pub sex: Sex,
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub coeff_c: f64,
    pub coeff_d: f64,
    pub coeff_e: f64,
    pub coeff_f: f64,
    pub last_updated: NaiveDateTime,
    pub total_submissions_used: i64,
    pub version: FormulaVersion,
}

fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

fn check_bodyweight(bodyweight: f64) -> Result<()> {
    if !bodyweight.is_finite() || bodyweight <= 0.0 {
        return Err(ScoringError::NonPositiveBodyweight(bodyweight));
    }
    Ok(())
}

fn positive(value: f64, bodyweight: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ScoringError::NonPositiveCoefficient { bodyweight })
    }
}

/// Calisthenics coefficient at `bodyweight` kg.
pub fn polynomial_coefficient(bodyweight: f64, formula: &FormulaCoefficients) -> Result<f64> {
    check_bodyweight(bodyweight)?;

    let quartic = [
        formula.coeff_b,
        formula.coeff_c,
        formula.coeff_d,
        formula.coeff_e,
        formula.coeff_f,
    ];
    let value = match formula.version {
        FormulaVersion::Current => horner(&quartic, bodyweight),
        FormulaVersion::LegacyQuintic => {
            formula.coeff_a * bodyweight.powi(5) + horner(&quartic, bodyweight)
        }
    };

    positive(value, bodyweight)
}

/// DOTS coefficient `500 / (A·W⁴ + B·W³ + C·W² + D·W + E)`.
pub fn dots_coefficient(bodyweight: f64, sex: Sex) -> Result<f64> {
    check_bodyweight(bodyweight)?;

    let constants = match sex {
        Sex::Male => &dots::MALE,
        Sex::Female => &dots::FEMALE,
    };
    let denominator = horner(constants, bodyweight);
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(ScoringError::NonPositiveCoefficient { bodyweight });
    }

    positive(SCORE_SCALE / denominator, bodyweight)
}

/// Rescales bench-relative movements onto the same 0-500 range as the big lifts.
pub fn bench_ratio_multiplier(exercise: ExerciseType) -> f64 {
    match exercise {
        ExerciseType::StrictPress => {
            SCORE_SCALE / (BENCH_REFERENCE_DOTS * STRICT_PRESS_TO_BENCH_RATIO)
        }
        ExerciseType::BarbellCurl => {
            SCORE_SCALE / (BENCH_REFERENCE_DOTS * BARBELL_CURL_TO_BENCH_RATIO)
        }
        _ => 1.0,
    }
}

/// Picks the coefficient family for `exercise`.
///
/// Calisthenics needs a formula for the lifter's sex; its absence is reported
/// as [`ScoringError::FormulaUnavailable`], not as a domain error.
pub fn lift_coefficient(
    exercise: ExerciseType,
    sex: Sex,
    bodyweight: f64,
    formula: Option<&FormulaCoefficients>,
) -> Result<f64> {
    if exercise.is_calisthenics() {
        let formula = formula
            .filter(|f| f.sex == sex)
            .ok_or(ScoringError::FormulaUnavailable(sex))?;
        polynomial_coefficient(bodyweight, formula)
    } else {
        dots_coefficient(bodyweight, sex)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{female_formula, male_formula};
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_current_polynomial_drops_quintic_term() {
        // 0.001·70⁴ − 0.2·70³ + 15·70² − 400·70 + 5000
        let coefficient = polynomial_coefficient(70.0, &male_formula()).unwrap();
        assert!(approx_eq(coefficient, 5910.0, 1e-6));
    }

    #[test]
    fn test_legacy_polynomial_keeps_quintic_term() {
        let formula = FormulaCoefficients {
            version: FormulaVersion::LegacyQuintic,
            ..male_formula()
        };
        let coefficient = polynomial_coefficient(70.0, &formula).unwrap();
        assert!(approx_eq(coefficient, 5911.6807, 1e-6));
    }

    #[test]
    fn test_polynomial_rejects_non_positive_result() {
        let formula = FormulaCoefficients {
            coeff_f: -1_000_000.0,
            ..male_formula()
        };
        assert_eq!(
            polynomial_coefficient(70.0, &formula),
            Err(ScoringError::NonPositiveCoefficient { bodyweight: 70.0 })
        );
    }

    #[test]
    fn test_dots_reference_total() {
        // 500 kg total at 80 kg bodyweight is ~344.8 DOTS in published tables.
        let coefficient = dots_coefficient(80.0, Sex::Male).unwrap();
        assert!(approx_eq(coefficient * 500.0, 344.77, 0.01));

        let coefficient = dots_coefficient(60.0, Sex::Female).unwrap();
        assert!(approx_eq(coefficient * 300.0, 332.56, 0.01));
    }

    #[test]
    fn test_dots_rejects_bad_bodyweight() {
        assert!(dots_coefficient(0.0, Sex::Male).is_err());
        assert!(dots_coefficient(-80.0, Sex::Female).is_err());
        // The quartic turns negative far outside human bodyweights.
        assert!(dots_coefficient(2000.0, Sex::Male).is_err());
    }

    #[test]
    fn test_bench_ratio_multipliers() {
        assert!(approx_eq(
            bench_ratio_multiplier(ExerciseType::StrictPress),
            500.0 / 84.5,
            1e-9
        ));
        assert!(approx_eq(
            bench_ratio_multiplier(ExerciseType::BarbellCurl),
            500.0 / 65.0,
            1e-9
        ));
        assert_eq!(bench_ratio_multiplier(ExerciseType::Bench), 1.0);
    }

    #[test]
    fn test_lift_coefficient_dispatch() {
        let male = male_formula();
        assert_eq!(
            lift_coefficient(ExerciseType::WeightedPullup, Sex::Male, 70.0, Some(&male)),
            polynomial_coefficient(70.0, &male)
        );
        assert_eq!(
            lift_coefficient(ExerciseType::Squat, Sex::Male, 70.0, None),
            dots_coefficient(70.0, Sex::Male)
        );
        assert_eq!(
            lift_coefficient(ExerciseType::WeightedDips, Sex::Female, 60.0, Some(&male)),
            Err(ScoringError::FormulaUnavailable(Sex::Female))
        );
        assert!(
            !lift_coefficient(ExerciseType::WeightedDips, Sex::Male, 60.0, None)
                .unwrap_err()
                .is_domain()
        );
    }

    proptest! {
        #[test]
        fn polynomial_positive_over_plausible_bodyweights(bodyweight in 40.0f64..=150.0) {
            for formula in [male_formula(), female_formula()] {
                let coefficient = polynomial_coefficient(bodyweight, &formula).unwrap();
                prop_assert!(coefficient.is_finite() && coefficient > 0.0);
            }
        }

        #[test]
        fn dots_positive_over_plausible_bodyweights(bodyweight in 40.0f64..=200.0) {
            for sex in [Sex::Male, Sex::Female] {
                let coefficient = dots_coefficient(bodyweight, sex).unwrap();
                prop_assert!(coefficient.is_finite() && coefficient > 0.0);
            }
        }
    }
}
