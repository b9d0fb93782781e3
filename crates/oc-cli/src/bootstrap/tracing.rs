//! Tracing configuration for OrcheNet
//!
//! Logs always go to a file in the platform log directory. The console layer
//! writes to stderr and is only installed on request, so it does not
//! interleave with the wizard prompts.

use std::{fs, io, path::PathBuf, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "orchenet.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug for the OrcheNet crates
/// - **Production**: info for the OrcheNet crates
/// - HTTP internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        "warn".to_string(),
        format!("orchenet={level}"),
        format!("oc_core={level}"),
        format!("oc_app={level}"),
        format!("oc_infra={level}"),
        format!("oc_cli={level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber
///
/// - **Environment filter**: respects `RUST_LOG`, falls back to
///   [`build_filter_directives`]
/// - **File**: `<data dir>/orchenet/logs/orchenet.log`, no ANSI colors
/// - **Console**: stderr, only when `verbose` is set
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let console_layer = verbose.then(|| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_target(true)
            .with_ansi(cfg!(not(test)))
            .with_writer(BoxMakeWriter::new(io::stderr))
    });

    let file_layer = match build_file_writer() {
        Ok(writer) => Some(
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        ),
        Err(err) => {
            if verbose {
                eprintln!("Failed to initialize file logging: {err}");
            }
            None
        }
    };

    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn log_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("orchenet").join("logs"))
        .ok_or_else(|| anyhow::anyhow!("No local data directory on this platform"))
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let logs_dir = log_dir()?;
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
