//! Tracing configuration for gigadmin
//!
//! ## Behavior / 行为
//!
//! - Events go to **stderr** so command output on stdout stays pipeable
//! - `RUST_LOG` overrides the built-in directives
//! - A daily rolling log file is added when `log_dir` is configured
//! - 配置了 `log_dir` 时额外写入按天滚动的日志文件

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "gigadmin.log";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development** or `--verbose`: debug for the console crates
/// - **Production**: info for the console crates
/// - HTTP stack crates stay at warn either way
fn build_filter_directives(is_dev: bool, verbose: bool) -> Vec<String> {
    let app_level = if is_dev || verbose { "debug" } else { "info" };
    let mut directives = vec![
        "warn".to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
    ];
    for target in ["gigadmin", "gigadmin_lib", "ga_app", "ga_infra", "ga_core"] {
        directives.push(format!("{}={}", target, app_level));
    }
    directives
}

/// Initialize the tracing subscriber
///
/// Call once from `main`, after the configuration is resolved.
/// 在 `main` 中解析配置后调用一次。
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered. A log directory that
/// cannot be created only disables the file layer.
pub fn init_tracing_subscriber(log_dir: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), verbose);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match log_dir.map(build_file_writer).transpose() {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("Failed to initialize file logging, continuing without it: {err}");
            None
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry().with(env_filter).with(stderr_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer(dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true, false);
        assert!(dev_directives.contains(&"ga_app=debug".to_string()));
        assert!(dev_directives.contains(&"ga_infra=debug".to_string()));
        assert!(dev_directives.contains(&"reqwest=warn".to_string()));

        let prod_directives = build_filter_directives(false, false);
        assert!(prod_directives.contains(&"ga_app=info".to_string()));
        assert!(prod_directives.contains(&"gigadmin=info".to_string()));
        assert_eq!(prod_directives[0], "warn");

        let verbose = build_filter_directives(false, true);
        assert!(verbose.contains(&"ga_infra=debug".to_string()));
    }

    #[test]
    fn test_file_writer_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        // The guard can only be installed once per process.
        let _ = build_file_writer(&logs);
        assert!(logs.is_dir());
    }
}
