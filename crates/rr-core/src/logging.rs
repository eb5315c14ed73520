//! Tracing setup and panic capture.
//!
//! The extraction pipeline converts panics into `ExtractError::Aborted`; the
//! capture hook installed here writes the panic site through `tracing` before
//! the guard swallows the unwind, so an aborted extraction leaves a log line
//! behind.

use std::panic;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Set up the process-wide subscriber and the panic capture: `RUST_LOG`
/// filtering, stdout by default, daily-rotated files when `RR_LOG_DIR` is
/// set. Safe to call more than once; later calls are no-ops.
pub fn init(app_name: &'static str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match rolling_writer(app_name) {
        Some(writer) => drop(builder.with_writer(writer).try_init()),
        None => drop(builder.try_init()),
    }

    install_panic_capture();
}

fn rolling_writer(app_name: &'static str) -> Option<BoxMakeWriter> {
    let dir = std::path::PathBuf::from(std::env::var_os("RR_LOG_DIR")?);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("cannot create log directory {}: {err}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Some(BoxMakeWriter::new(writer))
}

/// Route panic messages through `tracing::error!` with their source location.
/// The pre-existing hook (stderr print and backtrace) still runs afterwards
/// when `RR_LOG_INCLUDE_BACKTRACE` is truthy. Installed once per process.
pub(crate) fn install_panic_capture() {
    static CAPTURE: OnceLock<()> = OnceLock::new();

    CAPTURE.get_or_init(|| {
        let previous = panic::take_hook();
        let chain_previous = std::env::var("RR_LOG_INCLUDE_BACKTRACE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if chain_previous {
                previous(info);
            }
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init("logging-tests");
        init("logging-tests");
    }

    #[test]
    fn panic_capture_installs_once() {
        install_panic_capture();
        install_panic_capture();
    }
}
