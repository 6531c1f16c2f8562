use std::cmp::Ordering;
use std::collections::HashMap;

use scoring::{
    FormulaCoefficients, FormulaVersion, Sex, estimate_lift_added_1rm, score_lift,
};
use sqlx::PgPool;
use storage::{
    dto::submission::{
        CreateSubmissionRequest, LeaderboardEntry, LeaderboardFilter, LeaderboardSort,
        SubmissionResponse,
    },
    models::Submission,
    repository::submission::SubmissionRepository,
};

use crate::error::WebResult;
use crate::features::formulas::services::formulas_by_sex;

pub async fn create_submission(
    pool: &PgPool,
    req: &CreateSubmissionRequest,
) -> WebResult<SubmissionResponse> {
    let repo = SubmissionRepository::new(pool);
    let submission = repo.create(req).await?;

    tracing::info!(
        submission_id = %submission.submission_id,
        exercise_type = %submission.exercise_type,
        "Submission stored"
    );

    Ok(submission.into())
}

/// One page of the leaderboard plus the number of matching submissions
pub async fn get_leaderboard(
    pool: &PgPool,
    filter: &LeaderboardFilter,
    version: FormulaVersion,
) -> WebResult<(Vec<LeaderboardEntry>, i64)> {
    let repo = SubmissionRepository::new(pool);
    let submissions = repo.list_filtered(filter).await?;
    let formulas = formulas_by_sex(pool, version).await?;

    let ranked = rank_submissions(submissions, &formulas, filter.sort);
    let total_items = ranked.len() as i64;

    Ok((filter.pagination().slice(ranked), total_items))
}

/// Added-weight 1RM and score of a stored lift; either is `None` when it cannot be derived.
fn derive_scores(
    submission: &Submission,
    formulas: &HashMap<Sex, FormulaCoefficients>,
) -> (Option<f64>, Option<f64>) {
    let (Ok(lift), Ok(exercise)) = (submission.to_lift_input(), submission.exercise()) else {
        return (None, None);
    };

    let estimated_1rm = estimate_lift_added_1rm(&lift, exercise).ok();
    let final_score = score_lift(&lift, exercise, formulas.get(&lift.sex))
        .ok()
        .map(|result| result.final_score);

    (estimated_1rm, final_score)
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Scores and orders submissions that arrive newest first.
///
/// Sorting is stable, so ties keep the newest-first order. Ranks are 1-based
/// over the whole list, before pagination.
pub fn rank_submissions(
    submissions: Vec<Submission>,
    formulas: &HashMap<Sex, FormulaCoefficients>,
    sort: LeaderboardSort,
) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<(Submission, Option<f64>, Option<f64>)> = submissions
        .into_iter()
        .map(|submission| {
            let (estimated_1rm, final_score) = derive_scores(&submission, formulas);
            (submission, estimated_1rm, final_score)
        })
        .collect();

    match sort {
        LeaderboardSort::Date => {}
        LeaderboardSort::Weight => scored.sort_by(|a, b| descending_nulls_last(a.1, b.1)),
        LeaderboardSort::Score => scored.sort_by(|a, b| descending_nulls_last(a.2, b.2)),
    }

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (submission, estimated_1rm, final_score))| LeaderboardEntry {
            rank: index as i64 + 1,
            submission: submission.into(),
            estimated_1rm,
            final_score,
        })
        .collect()
}
