//! Configuration schema definitions

use crate::source::EnvSource;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use types::utils::{redact, redact_url_password};
use types::{ConfigError, ConfigValue, Result};

pub const NODE_ENV_VAR: &str = "NODE_ENV";
pub const PORT_VAR: &str = "PORT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// `NODE_ENV` value that enables the production readiness check
pub const PRODUCTION: &str = "production";

/// The reserved, strongly typed configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    NodeEnv,
    Port,
    DatabaseUrl,
    JwtSecret,
}

impl EnvKey {
    pub const ALL: [EnvKey; 4] = [
        EnvKey::NodeEnv,
        EnvKey::Port,
        EnvKey::DatabaseUrl,
        EnvKey::JwtSecret,
    ];

    /// Field name on [`EnvironmentConfig`]
    pub fn field_name(self) -> &'static str {
        match self {
            EnvKey::NodeEnv => "node_env",
            EnvKey::Port => "port",
            EnvKey::DatabaseUrl => "database_url",
            EnvKey::JwtSecret => "jwt_secret",
        }
    }

    /// Environment variable the field is read from
    pub fn var_name(self) -> &'static str {
        match self {
            EnvKey::NodeEnv => NODE_ENV_VAR,
            EnvKey::Port => PORT_VAR,
            EnvKey::DatabaseUrl => DATABASE_URL_VAR,
            EnvKey::JwtSecret => JWT_SECRET_VAR,
        }
    }
}

impl FromStr for EnvKey {
    type Err = ConfigError;

    /// Accepts either the field name (`port`) or the variable name (`PORT`)
    fn from_str(s: &str) -> Result<Self> {
        EnvKey::ALL
            .into_iter()
            .find(|k| k.field_name() == s || k.var_name() == s)
            .ok_or_else(|| ConfigError::UnknownKey { key: s.to_string() })
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Resolved environment configuration
///
/// Built once at startup and handed out by shared reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentConfig {
    /// Runtime environment name (`NODE_ENV`)
    pub node_env: String,
    /// HTTP port (`PORT`). `None` means the variable was set but is not a
    /// number; the default only applies when it is absent. Negative values
    /// and values above 65535 also resolve to `None` (see [`parse_port`]).
    pub port: Option<u16>,
    /// Database connection string (`DATABASE_URL`)
    pub database_url: Option<String>,
    /// Token signing secret (`JWT_SECRET`)
    pub jwt_secret: Option<String>,
    /// Caller-declared extension variables that were present
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            node_env: default_node_env(),
            port: Some(default_port()),
            database_url: None,
            jwt_secret: None,
            extra: BTreeMap::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Resolve the configuration from `source`.
    ///
    /// `NODE_ENV` and `PORT` fall back to their defaults when unset or empty.
    /// Extension keys are captured only when present; reserved keys in
    /// `extra_keys`, by field or variable name, are ignored.
    pub fn from_source<S: EnvSource + ?Sized>(source: &S, extra_keys: &[String]) -> Self {
        let node_env = non_empty(source.var(NODE_ENV_VAR)).unwrap_or_else(default_node_env);

        let port = match non_empty(source.var(PORT_VAR)) {
            None => Some(default_port()),
            Some(raw) => match parse_port(&raw) {
                Ok(port) => Some(port),
                Err(e) => {
                    warn!(error = %e, "PORT is not a number, no port resolved");
                    None
                }
            },
        };

        let extra = extra_keys
            .iter()
            .filter(|key| !is_reserved(key))
            .filter_map(|key| source.var(key).map(|value| (key.clone(), value)))
            .collect();

        Self {
            node_env,
            port,
            database_url: source.var(DATABASE_URL_VAR),
            jwt_secret: source.var(JWT_SECRET_VAR),
            extra,
        }
    }

    /// Look up a value by reserved key name or declared extension key.
    ///
    /// Returns `None` for absent values and for keys that are neither.
    pub fn get_env(&self, key: &str) -> Option<ConfigValue> {
        match key.parse::<EnvKey>() {
            Ok(key) => self.value(key),
            Err(_) => self.extra.get(key).cloned().map(ConfigValue::Text),
        }
    }

    /// Typed lookup of a reserved key
    pub fn value(&self, key: EnvKey) -> Option<ConfigValue> {
        match key {
            EnvKey::NodeEnv => Some(ConfigValue::Text(self.node_env.clone())),
            EnvKey::Port => Some(self.port.map_or(ConfigValue::NotANumber, ConfigValue::Integer)),
            EnvKey::DatabaseUrl => self.database_url.clone().map(ConfigValue::Text),
            EnvKey::JwtSecret => self.jwt_secret.clone().map(ConfigValue::Text),
        }
    }

    /// Every present entry, reserved fields first, keyed as `get_env` accepts them
    pub fn entries(&self) -> Vec<(&str, ConfigValue)> {
        let reserved = EnvKey::ALL
            .into_iter()
            .filter_map(|key| self.value(key).map(|value| (key.field_name(), value)));
        let extra = self
            .extra
            .iter()
            .map(|(key, value)| (key.as_str(), ConfigValue::Text(value.clone())));

        reserved.chain(extra).collect()
    }

    pub fn is_production(&self) -> bool {
        self.node_env == PRODUCTION
    }

    /// Copy with secret values masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            database_url: self.database_url.as_deref().map(redact_url_password),
            jwt_secret: self.jwt_secret.as_deref().map(redact),
            ..self.clone()
        }
    }
}

/// Parse a port the way a lenient base-10 integer parser does: leading
/// whitespace and a `+` sign are skipped and parsing stops at the first
/// non-digit. Fails when no digits are found or the number exceeds `u16`.
pub fn parse_port(raw: &str) -> Result<u16> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();

    unsigned[..digits]
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidValue {
            field: PORT_VAR.to_string(),
            value: raw.to_string(),
        })
}

// Field names count too, or `extra` would shadow the typed fields
fn is_reserved(key: &str) -> bool {
    key.parse::<EnvKey>().is_ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Default value functions
fn default_node_env() -> String {
    "development".to_string()
}

fn default_port() -> u16 {
    3000
}
