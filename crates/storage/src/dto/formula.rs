use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::FormulaRecord;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormulaResponse {
    pub gender: String,
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub coeff_c: f64,
    pub coeff_d: f64,
    pub coeff_e: f64,
    pub coeff_f: f64,
    pub total_submissions_used: i32,
    pub last_updated: NaiveDateTime,
    /// Polynomial shape the server applies to these coefficients
    pub formula_version: String,
}

impl FormulaResponse {
    pub fn from_record(record: FormulaRecord, formula_version: &str) -> Self {
        Self {
            gender: record.gender,
            coeff_a: record.coeff_a,
            coeff_b: record.coeff_b,
            coeff_c: record.coeff_c,
            coeff_d: record.coeff_d,
            coeff_e: record.coeff_e,
            coeff_f: record.coeff_f,
            total_submissions_used: record.total_submissions_used,
            last_updated: record.last_updated,
            formula_version: formula_version.to_string(),
        }
    }
}

/// Request payload for replacing a gender's fitted coefficients
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFormulaRequest {
    /// Only read by the legacy quintic formula
    #[serde(default)]
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub coeff_c: f64,
    pub coeff_d: f64,
    pub coeff_e: f64,
    pub coeff_f: f64,

    #[validate(range(min = 0, message = "total_submissions_used cannot be negative"))]
    pub total_submissions_used: i32,
}
