use chrono::NaiveDateTime;
use scoring::{FormulaCoefficients, FormulaVersion, Sex};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Community-fitted strength coefficient polynomial for one gender.
///
/// Current formula: C(W) = b·W⁴ + c·W³ + d·W² + e·W + f.
/// The legacy formula adds a·W⁵; which one applies is a deployment setting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FormulaRecord {
    pub id: i32,
    pub gender: String,
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub coeff_c: f64,
    pub coeff_d: f64,
    pub coeff_e: f64,
    pub coeff_f: f64,
    pub total_submissions_used: i32,
    pub last_updated: NaiveDateTime,
}

impl FormulaRecord {
    pub fn to_coefficients(&self, version: FormulaVersion) -> scoring::Result<FormulaCoefficients> {
        Ok(FormulaCoefficients {
            sex: self.gender.parse::<Sex>()?,
            coeff_a: self.coeff_a,
            coeff_b: self.coeff_b,
            coeff_c: self.coeff_c,
            coeff_d: self.coeff_d,
            coeff_e: self.coeff_e,
            coeff_f: self.coeff_f,
            last_updated: self.last_updated,
            total_submissions_used: i64::from(self.total_submissions_used),
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str) -> FormulaRecord {
        FormulaRecord {
            id: 1,
            gender: gender.to_string(),
            coeff_a: 0.0,
            coeff_b: 0.001,
            coeff_c: -0.2,
            coeff_d: 15.0,
            coeff_e: -400.0,
            coeff_f: 5000.0,
            total_submissions_used: 42,
            last_updated: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_to_coefficients_carries_version() {
        let coefficients = record("Female")
            .to_coefficients(FormulaVersion::LegacyQuintic)
            .unwrap();
        assert_eq!(coefficients.sex, Sex::Female);
        assert_eq!(coefficients.version, FormulaVersion::LegacyQuintic);
        assert_eq!(coefficients.total_submissions_used, 42);
    }

    #[test]
    fn test_to_coefficients_rejects_unknown_gender() {
        assert!(record("X").to_coefficients(FormulaVersion::Current).is_err());
    }
}
