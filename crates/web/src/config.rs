use anyhow::{Context, Result};
use scoring::FormulaVersion;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub formula_version: FormulaVersion,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let formula_version = match lookup("FORMULA_VERSION") {
            Some(version) => version
                .parse::<FormulaVersion>()
                .context("FORMULA_VERSION must be 'current' or 'legacy_quintic'")?,
            None => FormulaVersion::default(),
        };

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
            formula_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 3] = [
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/strength"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&BASE)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_keys, "");
        assert_eq!(config.formula_version, FormulaVersion::Current);
    }

    #[test]
    fn test_legacy_formula_version() {
        let mut vars = BASE.to_vec();
        vars.push(("FORMULA_VERSION", "legacy_quintic"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.formula_version, FormulaVersion::LegacyQuintic);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut vars = BASE.to_vec();
        vars.push(("FORMULA_VERSION", "cubic"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());

        let no_port = [("HOST", "0.0.0.0"), ("DATABASE_URL", "postgres://x")];
        assert!(Config::from_lookup(lookup(&no_port)).is_err());

        let bad_port = [("HOST", "h"), ("PORT", "eighty"), ("DATABASE_URL", "postgres://x")];
        assert!(Config::from_lookup(lookup(&bad_port)).is_err());
    }
}
