//! Configuration validation utilities
//!
//! Validation is advisory only: it never rejects a configuration, it just
//! collects warnings for the caller to log.

use crate::schema::{EnvironmentConfig, DATABASE_URL_VAR, JWT_SECRET_VAR};
use tracing::warn;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &EnvironmentConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_production_readiness(config, &mut report);

        report
    }

    /// Production deployments should carry a database URL and a signing secret
    fn validate_production_readiness(config: &EnvironmentConfig, report: &mut ValidationReport) {
        if !config.is_production() {
            return;
        }

        if is_unset(config.database_url.as_deref()) {
            report.add_warning(
                DATABASE_URL_VAR,
                "DATABASE_URL is not set for production environment",
            );
        }

        if is_unset(config.jwt_secret.as_deref()) {
            report.add_warning(
                JWT_SECRET_VAR,
                "JWT_SECRET is not set for production environment",
            );
        }
    }
}

// An empty string counts as missing
fn is_unset(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Validation report containing advisory warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationIssue>,
}

/// A single advisory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Emit every warning on the diagnostic stream
    pub fn log(&self) {
        for issue in &self.warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} warnings", self.warnings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapEnv;

    fn validate(env: MapEnv) -> ValidationReport {
        ConfigValidator::validate(&EnvironmentConfig::from_source(&env, &[]))
    }

    #[test]
    fn test_production_without_secrets_warns_twice() {
        let report = validate(MapEnv::new().with("NODE_ENV", "production"));
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].field, "DATABASE_URL");
        assert_eq!(report.warnings[1].field, "JWT_SECRET");
        assert_eq!(report.summary(), "Validation: 2 warnings");
    }

    #[test]
    fn test_production_with_secrets_is_clean() {
        let report = validate(
            MapEnv::new()
                .with("NODE_ENV", "production")
                .with("DATABASE_URL", "postgres://db/app")
                .with("JWT_SECRET", "secret"),
        );
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_production_with_empty_secret_warns() {
        let report = validate(
            MapEnv::new()
                .with("NODE_ENV", "production")
                .with("DATABASE_URL", "postgres://db/app")
                .with("JWT_SECRET", ""),
        );
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].message,
            "JWT_SECRET is not set for production environment"
        );
    }

    #[test]
    fn test_non_production_never_warns() {
        assert!(!validate(MapEnv::new()).has_warnings());
        assert!(!validate(MapEnv::new().with("NODE_ENV", "PRODUCTION")).has_warnings());
        assert!(!validate(MapEnv::new().with("NODE_ENV", "staging")).has_warnings());
    }
}
