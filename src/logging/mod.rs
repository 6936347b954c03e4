/*!
 * Logging Module
 * Centralized logging configuration and utilities
 */
pub mod middleware;

use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system.
///
/// The returned guards flush the non-blocking writers; dropping them shuts
/// down the background log-writer threads and loses buffered lines, so the
/// caller must hold them for the process lifetime.
pub fn init() -> Vec<WorkerGuard> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let is_production = environment == "production";

    std::fs::create_dir_all("logs").ok();

    // Daily-rolling file appender for all logs, plus one for errors only
    let file_appender = rolling::daily("logs", "app.log");
    let (file_writer, file_guard) = non_blocking(file_appender);

    let error_appender = rolling::daily("logs", "error.log");
    let (error_writer, error_guard) = non_blocking(error_appender);

    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if is_production {
            "info".to_string()
        } else {
            "debug".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bloop_blog={},tower_http=debug,axum=debug",
            log_level
        ))
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if is_production {
        // JSON format for production
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    } else {
        // Pretty format for development
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber.with(file_layer).with(console_layer).init();
    }

    tracing::info!("Logging initialized for {} environment", environment);

    vec![file_guard, error_guard, console_guard]
}
