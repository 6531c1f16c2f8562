//! One-rep-max estimation from rep sets and its inverses.
//!
//! Every estimate is the unweighted mean of three strength curves with
//! different curvature: Epley (linear), Brzycki (hyperbolic) and Lombardi
//! (power). Inverses invert each curve separately and average the results,
//! which only approximately undoes the forward mean.

use crate::error::{Result, ScoringError};

/// Brzycki divides by `37 - reps`, so 37 and above have no estimate.
pub const REPS_EXCLUSIVE_MAX: u32 = 37;

/// Bounds applied to the continuous rep solver.
pub const MIN_SOLVED_REPS: f64 = 0.1;
pub const MAX_SOLVED_REPS: f64 = 36.0;

mod epley {
    pub const K: f64 = 0.0333;
}

mod brzycki {
    pub const NUMERATOR: f64 = 36.0;
    pub const OFFSET: f64 = 37.0;
}

mod lombardi {
    pub const EXPONENT: f64 = 0.1;
}

fn check_reps(reps: u32) -> Result<()> {
    if reps == 0 || reps >= REPS_EXCLUSIVE_MAX {
        return Err(ScoringError::RepsOutOfRange(reps));
    }
    Ok(())
}

fn check_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ScoringError::NonPositiveWeight(weight));
    }
    Ok(())
}

/// Estimates the total one-rep max for `reps` repetitions at `total_weight`.
///
/// A single rep is its own max. Reps of 37 or more are rejected.
pub fn estimate_total_1rm(total_weight: f64, reps: u32) -> Result<f64> {
    check_weight(total_weight)?;
    check_reps(reps)?;

    if reps == 1 {
        return Ok(total_weight);
    }

    let r = reps as f64;
    let epley = total_weight * (1.0 + epley::K * r);
    let brzycki = total_weight * brzycki::NUMERATOR / (brzycki::OFFSET - r);
    let lombardi = total_weight * r.powf(lombardi::EXPONENT);

    Ok((epley + brzycki + lombardi) / 3.0)
}

/// Working weight that should produce `target_1rm` when lifted for `reps`.
pub fn invert_weight_for_target_1rm(target_1rm: f64, reps: u32) -> Result<f64> {
    check_weight(target_1rm)?;
    check_reps(reps)?;

    if reps == 1 {
        return Ok(target_1rm);
    }

    let r = reps as f64;
    let epley = target_1rm / (1.0 + epley::K * r);
    let brzycki = target_1rm * (brzycki::OFFSET - r) / brzycki::NUMERATOR;
    let lombardi = target_1rm / r.powf(lombardi::EXPONENT);

    Ok((epley + brzycki + lombardi) / 3.0)
}

/// Fraction of the one-rep max that can be lifted for exactly `reps`.
pub fn relative_intensity(reps: u32) -> Result<f64> {
    invert_weight_for_target_1rm(1.0, reps)
}

fn check_solvable(target_1rm: f64, working_weight: f64) -> Result<()> {
    check_weight(target_1rm)?;
    check_weight(working_weight)?;
    if working_weight >= target_1rm {
        return Err(ScoringError::WorkingWeightNotBelowTarget {
            working: working_weight,
            target: target_1rm,
        });
    }
    Ok(())
}

/// Continuous rep count at `working_weight` that corresponds to `target_1rm`,
/// clamped to `[0.1, 36]`.
pub fn solve_reps_for_target_1rm(target_1rm: f64, working_weight: f64) -> Result<f64> {
    check_solvable(target_1rm, working_weight)?;

    let ratio = target_1rm / working_weight;
    let epley = (ratio - 1.0) / epley::K;
    let brzycki = brzycki::OFFSET - brzycki::NUMERATOR / ratio;
    let lombardi = ratio.powf(1.0 / lombardi::EXPONENT);

    let reps = (epley + brzycki + lombardi) / 3.0;
    Ok(reps.clamp(MIN_SOLVED_REPS, MAX_SOLVED_REPS))
}

/// Whole rep count in `1..=36` whose forward estimate lands closest to `target_1rm`.
pub fn solve_whole_reps_for_target_1rm(target_1rm: f64, working_weight: f64) -> Result<u32> {
    check_solvable(target_1rm, working_weight)?;

    let mut best = (1, f64::INFINITY);
    for reps in 1..REPS_EXCLUSIVE_MAX {
        let error = (estimate_total_1rm(working_weight, reps)? - target_1rm).abs();
        if error < best.1 {
            best = (reps, error);
        }
    }

    Ok(best.0)
}
