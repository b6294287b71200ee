//! # Structured Logging Module
//!
//! Environment-aware structured logging for recovery runs. Logs go to stderr
//! so that stdout carries only the recovery report.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging.
///
/// `verbosity` is the number of `-v` flags. When it is zero the level comes
/// from `RUST_LOG`, then from the detected environment.
pub fn init_structured_logging(verbosity: u8) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = build_filter(verbosity, &environment);
        let json = environment == "production";

        let console: Box<dyn Layer<Registry> + Send + Sync> = if json {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .boxed()
        };

        // Use try_init to avoid panic if global subscriber already set
        if tracing_subscriber::registry()
            .with(console.with_filter(filter))
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::debug!(environment = %environment, json, "Logging initialized");
    });
}

fn build_filter(verbosity: u8, environment: &str) -> EnvFilter {
    if verbosity > 0 {
        return EnvFilter::new(get_verbosity_level(verbosity));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(get_log_level(environment)))
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SFN_RECOVER_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "test" => "debug",
        "production" => "info",
        _ => "warn",
    }
}

fn get_verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log structured data for a recovery operation on one execution
pub fn log_recovery_operation(
    operation: &str,
    execution_arn: &str,
    new_execution_arn: Option<&str>,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        execution_arn = %execution_arn,
        new_execution_arn = new_execution_arn,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "RECOVERY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
