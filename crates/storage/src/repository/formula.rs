use sqlx::PgPool;

use crate::dto::formula::UpdateFormulaRequest;
use crate::error::{Result, StorageError};
use crate::models::FormulaRecord;

const FORMULA_COLUMNS: &str = r#"
    id, gender, coeff_a, coeff_b, coeff_c, coeff_d, coeff_e, coeff_f,
    total_submissions_used, last_updated
"#;

pub struct FormulaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FormulaRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<FormulaRecord>> {
        let formulas = sqlx::query_as::<_, FormulaRecord>(&format!(
            "SELECT {FORMULA_COLUMNS} FROM formulas ORDER BY gender"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(formulas)
    }

    pub async fn get_by_gender(&self, gender: &str) -> Result<FormulaRecord> {
        let formula = sqlx::query_as::<_, FormulaRecord>(&format!(
            "SELECT {FORMULA_COLUMNS} FROM formulas WHERE gender = $1"
        ))
        .bind(gender)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(formula)
    }

    /// Replace (or create) the coefficients for a gender and stamp the update time.
    pub async fn upsert(&self, gender: &str, req: &UpdateFormulaRequest) -> Result<FormulaRecord> {
        let formula = sqlx::query_as::<_, FormulaRecord>(&format!(
            r#"
            INSERT INTO formulas
                (gender, coeff_a, coeff_b, coeff_c, coeff_d, coeff_e, coeff_f,
                 total_submissions_used, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (gender) DO UPDATE SET
                coeff_a = EXCLUDED.coeff_a,
                coeff_b = EXCLUDED.coeff_b,
                coeff_c = EXCLUDED.coeff_c,
                coeff_d = EXCLUDED.coeff_d,
                coeff_e = EXCLUDED.coeff_e,
                coeff_f = EXCLUDED.coeff_f,
                total_submissions_used = EXCLUDED.total_submissions_used,
                last_updated = EXCLUDED.last_updated
            RETURNING {FORMULA_COLUMNS}
            "#
        ))
        .bind(gender)
        .bind(req.coeff_a)
        .bind(req.coeff_b)
        .bind(req.coeff_c)
        .bind(req.coeff_d)
        .bind(req.coeff_e)
        .bind(req.coeff_f)
        .bind(req.total_submissions_used)
        .fetch_one(self.pool)
        .await?;

        Ok(formula)
    }
}
