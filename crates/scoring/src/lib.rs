//! Strength scoring for weighted calisthenics and barbell lifts.
//!
//! Pure functions only: callers pass in already-resolved formula coefficients
//! and receive fresh result values.

pub mod coefficient;
pub mod day_max;
pub mod error;
pub mod one_rep_max;
pub mod score;
pub mod types;

pub use coefficient::{
    FormulaCoefficients, FormulaVersion, dots_coefficient, lift_coefficient,
    polynomial_coefficient,
};
pub use day_max::{DayMaxEstimate, DayMaxInput, estimate_day_max};
pub use error::{Result, ScoringError};
pub use one_rep_max::{
    estimate_total_1rm, invert_weight_for_target_1rm, solve_reps_for_target_1rm,
    solve_whole_reps_for_target_1rm,
};
pub use score::{
    TargetLift, compute_final_score, estimate_lift_added_1rm, estimate_lift_total_1rm, score_lift,
};
pub use types::{
    Effort, ExerciseType, FormQuality, LiftInput, PullupGrip, RestInterval, ScoreResult, Sex,
};
