//! Output formatting for resolved configurations

use anyhow::{Context, Result};
use config::{EnvKey, EnvironmentConfig};
use types::utils::{redact, redact_url_password};
use types::ConfigValue;

/// Human-readable `key = value` listing, reserved fields first.
pub fn render_text(config: &EnvironmentConfig) -> String {
    let width = config
        .entries()
        .iter()
        .map(|(key, _)| key.len())
        .chain(EnvKey::ALL.iter().map(|k| k.field_name().len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for key in EnvKey::ALL {
        let value = config
            .value(key)
            .map_or_else(|| "(unset)".to_string(), |v| v.to_string());
        out.push_str(&format!("{:width$} = {}\n", key.field_name(), value));
    }
    for (key, value) in &config.extra {
        out.push_str(&format!("{:width$} = {}\n", key, value));
    }
    out
}

/// Pretty JSON of the whole record
pub fn render_json(config: &EnvironmentConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize configuration")
}

/// Single lookup for `--get`; secrets are masked unless `show_secrets`
pub fn render_value(config: &EnvironmentConfig, key: &str, show_secrets: bool) -> Option<String> {
    let value = config.get_env(key)?;

    let rendered = match (key.parse::<EnvKey>().ok(), value) {
        (Some(EnvKey::DatabaseUrl), ConfigValue::Text(url)) if !show_secrets => {
            redact_url_password(&url)
        }
        (Some(EnvKey::JwtSecret), ConfigValue::Text(secret)) if !show_secrets => redact(&secret),
        (_, other) => other.to_string(),
    };
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::MapEnv;

    fn sample() -> EnvironmentConfig {
        let env = MapEnv::new()
            .with("NODE_ENV", "production")
            .with("PORT", "8080")
            .with("DATABASE_URL", "postgres://app:hunter2@db/app")
            .with("JWT_SECRET", "a-very-long-signing-secret")
            .with("REGION", "eu-west-1");
        EnvironmentConfig::from_source(&env, &["REGION".to_string()])
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&EnvironmentConfig::default());
        assert_eq!(
            text,
            "node_env     = development\n\
             port         = 3000\n\
             database_url = (unset)\n\
             jwt_secret   = (unset)\n"
        );
    }

    #[test]
    fn test_render_text_includes_extras() {
        let text = render_text(&sample().redacted());
        assert!(text.contains("REGION       = eu-west-1\n"));
        assert!(text.contains("jwt_secret   = a-ve****\n"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample().redacted()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["port"], 8080);
        assert_eq!(value["REGION"], "eu-west-1");
        assert_eq!(value["database_url"], "postgres://app:****@db/app");
    }

    #[test]
    fn test_render_value() {
        let config = sample();
        assert_eq!(render_value(&config, "port", false).as_deref(), Some("8080"));
        assert_eq!(render_value(&config, "REGION", false).as_deref(), Some("eu-west-1"));
        assert_eq!(render_value(&config, "JWT_SECRET", false).as_deref(), Some("a-ve****"));
        assert_eq!(
            render_value(&config, "database_url", false).as_deref(),
            Some("postgres://app:****@db/app")
        );
        assert_eq!(
            render_value(&config, "jwt_secret", true).as_deref(),
            Some("a-very-long-signing-secret")
        );
        assert_eq!(render_value(&config, "UNKNOWN", false), None);
    }

    #[test]
    fn test_render_value_not_a_number() {
        let config = EnvironmentConfig::from_source(&MapEnv::new().with("PORT", "abc"), &[]);
        assert_eq!(render_value(&config, "port", false).as_deref(), Some("NaN"));
    }
}
