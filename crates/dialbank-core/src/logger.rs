//! Minimal logger for unattended poll loops.
//!
//! Messages go to stderr as `[stamp LEVEL] message`, where the stamp is
//! local wall-clock time in the same `%Y%m%d-%H%M%S` family the snapshot
//! writer uses for file names, so a log line can be matched to the frame
//! dump it describes. Install once at startup with `init_with_level`.

use std::io::Write;
use std::sync::OnceLock;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Second-resolution sibling of the snapshot file-name pattern.
const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

fn wall_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

struct PollLogger {
    level: LevelFilter,
}

impl Log for PollLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[{} {:>5}] {}",
            wall_stamp(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<PollLogger> = OnceLock::new();

/// Install the poll logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| PollLogger { level });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Output shape for the tracing subscriber.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceFormat {
    /// Human-readable lines for a terminal.
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Install a tracing subscriber instead of the plain logger.
///
/// The filter comes from `RUST_LOG` when set, else `info`. Span close
/// events are emitted so per-cycle timings show up without extra code.
#[cfg(feature = "tracing")]
pub fn init_tracing(format: TraceFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_span_events(FmtSpan::CLOSE);
    match format {
        TraceFormat::Json => {
            let _ = builder.json().flatten_event(true).finish().try_init();
        }
        TraceFormat::Pretty => {
            let _ = builder.finish().try_init();
        }
    }
}
