//! Configuration loader implementation

use crate::schema::EnvironmentConfig;
use crate::source::{EnvSource, ProcessEnv};
use crate::validation::{ConfigValidator, ValidationReport};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default dotenv location: the workspace root, two levels above this crate
pub fn default_dotenv_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../.env")
}

/// Outcome of applying a dotenv file to the process environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvStatus {
    /// File read; `skipped_lines` counts lines that did not parse
    Loaded { path: PathBuf, skipped_lines: usize },
    /// No file at the path
    NotFound { path: PathBuf },
    /// File exists but could not be opened or read
    Unreadable { path: PathBuf, reason: String },
    /// Dotenv loading was disabled
    Skipped,
}

impl DotenvStatus {
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded {
                path,
                skipped_lines: 0,
            } => {
                info!("Loaded environment variables from {}", path.display())
            }
            DotenvStatus::Loaded {
                path,
                skipped_lines,
            } => {
                warn!(
                    "Loaded environment variables from {}, skipped {} malformed line(s)",
                    path.display(),
                    skipped_lines
                )
            }
            DotenvStatus::NotFound { path } => {
                debug!("No .env file at {}", path.display())
            }
            DotenvStatus::Unreadable { path, reason } => {
                warn!("Could not load .env file {}: {}", path.display(), reason)
            }
            DotenvStatus::Skipped => debug!(".env loading disabled"),
        }
    }
}

/// Apply a dotenv file to the process environment.
///
/// Variables that are already set are left untouched. Lines that do not
/// parse are skipped and the rest of the file is still applied. Failures
/// are reported through the returned status, never raised.
pub fn load_dotenv(path: &Path) -> DotenvStatus {
    let path = path.to_path_buf();
    let lines = match dotenv::from_path_iter(&path) {
        Ok(lines) => lines,
        Err(e) if e.not_found() => return DotenvStatus::NotFound { path },
        Err(e) => {
            return DotenvStatus::Unreadable {
                path,
                reason: e.to_string(),
            }
        }
    };

    let mut skipped_lines = 0;
    for item in lines {
        match item {
            Ok((key, value)) => {
                if env::var_os(&key).is_none() {
                    env::set_var(&key, value);
                }
            }
            Err(dotenv::Error::LineParse(line, _)) => {
                debug!(line = %line, "Skipping malformed .env line");
                skipped_lines += 1;
            }
            // I/O errors repeat on every read, stop here
            Err(e) => {
                return DotenvStatus::Unreadable {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }

    DotenvStatus::Loaded {
        path,
        skipped_lines,
    }
}

/// A resolved configuration together with how it was produced
#[derive(Debug, Clone)]
pub struct LoadedEnvironment {
    config: EnvironmentConfig,
    dotenv: DotenvStatus,
    report: ValidationReport,
}

impl LoadedEnvironment {
    /// The full configuration snapshot
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn dotenv_status(&self) -> &DotenvStatus {
        &self.dotenv
    }

    /// Advisories raised while loading
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_config(self) -> EnvironmentConfig {
        self.config
    }
}

/// Configuration loader that handles the dotenv file and environment variables
#[derive(Debug, Clone)]
pub struct EnvLoader {
    dotenv_path: Option<PathBuf>,
    extra_keys: Vec<String>,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLoader {
    /// Loader reading the default dotenv file and the reserved keys only
    pub fn new() -> Self {
        Self {
            dotenv_path: Some(default_dotenv_path()),
            extra_keys: Vec::new(),
        }
    }

    /// Read the dotenv file from `path` instead of the default location
    pub fn dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Do not touch the process environment at all
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv_path = None;
        self
    }

    /// Capture an additional variable into the `extra` map
    pub fn extra_key(mut self, key: impl Into<String>) -> Self {
        self.extra_keys.push(key.into());
        self
    }

    pub fn extra_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Apply the dotenv file, resolve the configuration from the process
    /// environment and log the outcome, dotenv status and advisories included.
    pub fn load(&self) -> LoadedEnvironment {
        let dotenv = self.apply_dotenv();
        dotenv.log();

        let loaded = self.resolve(&ProcessEnv, dotenv);
        loaded.report.log();
        loaded
    }

    /// First half of [`load`](Self::load), for callers that must set up
    /// logging after the dotenv file is applied but before resolving.
    pub fn apply_dotenv(&self) -> DotenvStatus {
        match &self.dotenv_path {
            Some(path) => load_dotenv(path),
            None => DotenvStatus::Skipped,
        }
    }

    /// Resolve and validate without logging
    pub fn resolve<S: EnvSource + ?Sized>(
        &self,
        source: &S,
        dotenv: DotenvStatus,
    ) -> LoadedEnvironment {
        let config = EnvironmentConfig::from_source(source, &self.extra_keys);
        let report = ConfigValidator::validate(&config);

        LoadedEnvironment {
            config,
            dotenv,
            report,
        }
    }

    /// Resolve from an injected source; no dotenv file is read
    pub fn load_from_source<S: EnvSource + ?Sized>(&self, source: &S) -> LoadedEnvironment {
        self.resolve(source, DotenvStatus::Skipped)
    }
}
