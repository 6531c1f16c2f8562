use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::submission::{CreateSubmissionRequest, LeaderboardFilter, to_decimal};
use crate::error::Result;
use crate::models::Submission;

/// Most recent rows scored per leaderboard request.
pub const LEADERBOARD_ROW_LIMIT: i64 = 5_000;

pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submissions matching the filter, newest first, capped at
    /// [`LEADERBOARD_ROW_LIMIT`] rows.
    pub async fn list_filtered(&self, filter: &LeaderboardFilter) -> Result<Vec<Submission>> {
        let mut query = leaderboard_query(filter);
        let submissions: Vec<Submission> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(submissions)
    }

    pub async fn create(&self, req: &CreateSubmissionRequest) -> Result<Submission> {
        let gender = req.stored_gender()?;
        let exercise_type = req.stored_exercise_type()?;
        let form_quality = req.stored_form_quality()?;
        let pullup_type = req.stored_pullup_type()?;

        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions
                (gender, bodyweight, added_weight, reps, form_quality, penalty_weight,
                 user_name, video_url, pullup_type, exercise_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING submission_id, created_at, gender, bodyweight, added_weight, reps,
                      form_quality, penalty_weight, user_name, video_url, pullup_type,
                      exercise_type, is_processed
            "#,
        )
        .bind(gender)
        .bind(to_decimal(req.bodyweight))
        .bind(to_decimal(req.added_weight))
        .bind(req.reps)
        .bind(form_quality)
        .bind(to_decimal(req.stored_penalty()))
        .bind(req.user_name.as_deref().map(str::trim))
        .bind(req.video_url.as_deref())
        .bind(pullup_type)
        .bind(exercise_type)
        .fetch_one(self.pool)
        .await?;

        Ok(submission)
    }
}

fn leaderboard_query(filter: &LeaderboardFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT submission_id, created_at, gender, bodyweight, added_weight, reps,
               form_quality, penalty_weight, user_name, video_url, pullup_type,
               exercise_type, is_processed
        FROM submissions
        WHERE 1=1
        "#,
    );

    push_filters(&mut query, filter);
    query.push(" ORDER BY created_at DESC LIMIT ");
    query.push_bind(LEADERBOARD_ROW_LIMIT);
    query
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &LeaderboardFilter) {
    if let Some(exercise) = filter.exercise_type() {
        query.push(" AND exercise_type = ");
        query.push_bind(exercise.to_string());
    }

    if let Some(gender) = filter.gender() {
        query.push(" AND gender = ");
        query.push_bind(gender.to_string());
    }

    if let Some(grip) = filter.pullup_type() {
        query.push(" AND pullup_type = ");
        query.push_bind(grip.to_string());
    }

    if let Some(quality) = filter.form_quality() {
        query.push(" AND form_quality = ");
        query.push_bind(quality.to_string());
    }

    match filter.has_video() {
        Some("with_video") => {
            query.push(" AND video_url IS NOT NULL AND video_url <> ''");
        }
        Some("without_video") => {
            query.push(" AND (video_url IS NULL OR video_url = '')");
        }
        _ => {}
    }

    if let Some(search) = filter.search() {
        query.push(" AND user_name ILIKE ");
        query.push_bind(format!("%{}%", escape_like(search)));
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
