//! envcheck - resolve and inspect the backend environment configuration

use anyhow::{Context, Result};
use clap::Parser;
use config::{EnvLoader, ProcessEnv};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

/// Resolve the environment configuration the backend would start with
#[derive(Debug, Parser)]
#[command(name = "envcheck", version)]
struct Cli {
    /// Read variables from this dotenv file instead of the workspace `.env`
    #[arg(long, value_name = "PATH", conflicts_with = "no_env_file")]
    env_file: Option<PathBuf>,

    /// Skip dotenv loading entirely
    #[arg(long)]
    no_env_file: bool,

    /// Additional variable to capture (repeatable)
    #[arg(long = "extra", value_name = "KEY")]
    extra: Vec<String>,

    /// Print the configuration as JSON
    #[arg(long, conflicts_with = "get")]
    json: bool,

    /// Print a single value by field or variable name
    #[arg(long, value_name = "KEY")]
    get: Option<String>,

    /// Print secrets in clear text
    #[arg(long)]
    show_secrets: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = EnvLoader::new().extra_keys(cli.extra.iter().cloned());
    if cli.no_env_file {
        loader = loader.without_dotenv();
    } else if let Some(path) = &cli.env_file {
        loader = loader.dotenv_path(path);
    }

    // Apply .env before logging so RUST_LOG and LOG_FORMAT can come from it
    let dotenv = loader.apply_dotenv();

    init_logging()?;
    dotenv.log();

    let loaded = loader.resolve(&ProcessEnv, dotenv);
    loaded.report().log();
    debug!("{}", loaded.report().summary());

    let config = loaded.config();
    info!(node_env = %config.node_env, "Configuration resolved");

    if let Some(key) = &cli.get {
        if let Some(value) = render::render_value(config, key, cli.show_secrets) {
            println!("{}", value);
        }
        return Ok(());
    }

    let shown = if cli.show_secrets {
        config.clone()
    } else {
        config.redacted()
    };

    if cli.json {
        println!("{}", render::render_json(&shown)?);
    } else {
        print!("{}", render::render_text(&shown));
    }

    Ok(())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries the configuration output, diagnostics go to stderr
    match log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    debug!("Log level: {}, format: {}", log_level, log_format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "envcheck",
            "--env-file",
            "/tmp/app.env",
            "--extra",
            "FOO",
            "--extra",
            "BAR",
            "--json",
        ]);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/app.env")));
        assert_eq!(cli.extra, vec!["FOO".to_string(), "BAR".to_string()]);
        assert!(cli.json);
        assert!(!cli.show_secrets);
    }

    #[test]
    fn test_cli_conflicts() {
        assert!(Cli::try_parse_from(["envcheck", "--env-file", "x", "--no-env-file"]).is_err());
        assert!(Cli::try_parse_from(["envcheck", "--json", "--get", "port"]).is_err());
    }
}
