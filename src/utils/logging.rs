//! Logging initialization
//!
//! The host application calls [`init_logging`] once at startup. The
//! returned guard must be kept alive for the program's lifetime when file
//! logging is enabled, so buffered messages are flushed on shutdown.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LogTarget, LoggingConfig};

/// Initialize the global tracing subscriber per configuration.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.target {
        LogTarget::Console => {
            init_console(tracing_subscriber::registry().with(env_filter), &config.format);
            None
        }
        LogTarget::File => {
            let (writer, guard) = file_writer(config);
            init_file(
                tracing_subscriber::registry().with(env_filter),
                &config.format,
                writer,
            );
            Some(guard)
        }
        LogTarget::Both => {
            let (writer, guard) = file_writer(config);
            init_both(
                tracing_subscriber::registry().with(env_filter),
                &config.format,
                writer,
            );
            Some(guard)
        }
    }
}

fn file_writer(
    config: &LoggingConfig,
) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    if let Err(e) = std::fs::create_dir_all(&config.log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            config.log_dir, e
        );
    }

    let appender = if config.daily_rotation {
        tracing_appender::rolling::daily(&config.log_dir, &config.log_prefix)
    } else {
        tracing_appender::rolling::never(&config.log_dir, &config.log_prefix)
    };

    tracing_appender::non_blocking(appender)
}

fn init_console<S>(subscriber: S, format: &LogFormat)
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    match format {
        LogFormat::Json => subscriber.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Compact => subscriber.with(fmt::layer().compact()).init(),
        LogFormat::Pretty => subscriber.with(fmt::layer()).init(),
    }
}

fn init_file<S>(
    subscriber: S,
    format: &LogFormat,
    writer: tracing_appender::non_blocking::NonBlocking,
) where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    match format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(true).with_writer(writer))
            .init(),
        LogFormat::Compact => subscriber
            .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
            .init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init(),
    }
}

fn init_both<S>(
    subscriber: S,
    format: &LogFormat,
    writer: tracing_appender::non_blocking::NonBlocking,
) where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    match format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(true))
            .with(fmt::layer().json().with_target(true).with_writer(writer))
            .init(),
        LogFormat::Compact => subscriber
            .with(fmt::layer().compact())
            .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
            .init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer())
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init(),
    }
}
