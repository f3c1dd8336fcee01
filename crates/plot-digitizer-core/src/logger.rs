//! Stderr logging for binaries and tests.
//!
//! Library code only emits through the `log` macros. A host installs one
//! sink at startup: [`init_with_level`] for the built-in stderr logger, or
//! `init_tracing` when the `tracing` feature is on.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Filter used when neither the caller nor `RUST_LOG` provide one.
pub const DEFAULT_LOG_DIRECTIVES: &str = "info";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:<5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with one level for every target.
///
/// Only the first call installs anything; later calls return `Ok(())`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber on stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `directives` and then
/// [`DEFAULT_LOG_DIRECTIVES`]. Closing spans are reported so instrumented
/// stages print their duration.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, directives: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(directives.unwrap_or(DEFAULT_LOG_DIRECTIVES))
    });
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let output: Box<dyn Layer<Registry> + Send + Sync> = if json {
        base.json().flatten_event(true).boxed()
    } else {
        base.with_timer(fmt::time::Uptime::default()).boxed()
    };
    let _ = tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init();
}
