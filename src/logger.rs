use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable that turns on debug output for the whole process
pub const VERBOSE_ENV_VAR: &str = "GRADIENT_GALLERY_VERBOSE";

const CRATE_TARGET: &str = "gradient_gallery";

struct GalleryLogger;

#[derive(Default)]
struct LoggerState {
    enabled: bool,
    verbose: bool,
    to_stderr: bool,
    file: Option<File>,
}

static LOGGER: GalleryLogger = GalleryLogger;
static STATE: LazyLock<Mutex<LoggerState>> = LazyLock::new(|| Mutex::new(LoggerState::default()));

/// Writer for tracing spans; they only ever go to the log file
#[derive(Clone)]
struct SpanFileWriter;

impl Write for SpanFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = STATE.lock().file.as_mut() {
            let _ = file.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = STATE.lock().file.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SpanFileWriter {
    type Writer = SpanFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SpanFileWriter
    }
}

/// Whether a record from `target` at `level` passes the filter.
///
/// Our own records are shown down to debug in verbose mode and down to warn
/// otherwise. HTTP plumbing stays quiet unless verbose.
fn allows(target: &str, level: Level, verbose: bool) -> bool {
    if target.starts_with(CRATE_TARGET) {
        return if verbose {
            level <= Level::Debug
        } else {
            level <= Level::Warn
        };
    }

    if !verbose {
        return level <= Level::Error;
    }

    let noisy = ["reqwest", "hyper", "h2", "rustls", "want", "mio", "arboard"]
        .iter()
        .any(|prefix| target.starts_with(prefix));
    if noisy {
        level <= Level::Warn
    } else {
        level <= Level::Info
    }
}

impl log::Log for GalleryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let state = STATE.lock();
        state.enabled && allows(metadata.target(), metadata.level(), state.verbose)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let message = format!(
            "{} {} [{}] - {}\n",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        );

        let mut state = STATE.lock();
        if let Some(file) = state.file.as_mut() {
            let _ = file.write_all(message.as_bytes());
            let _ = file.flush();
        }
        // stdout carries generated code, so diagnostics go to stderr
        if state.to_stderr {
            eprint!("{message}");
        }
    }

    fn flush(&self) {
        if let Some(file) = STATE.lock().file.as_mut() {
            let _ = file.flush();
        }
    }
}

/// Initialize logging for both the `log` facade and tracing spans.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::{Once, OnceLock};
    static INIT: Once = Once::new();
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.call_once(|| {
        let verbose = verbose || std::env::var(VERBOSE_ENV_VAR).is_ok();
        set_verbose_logging(verbose);
        enable_logging();
        set_log_to_stderr(true);

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if verbose {
                "gradient_gallery=debug,warn".into()
            } else {
                "gradient_gallery=info,warn".into()
            }
        });

        let fmt_layer = fmt::Layer::new()
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(SpanFileWriter);

        let tracing_result = Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();

        let log_result = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));

        let result = match (tracing_result, log_result) {
            (Ok(()), Ok(())) | (Err(_), Ok(())) => Ok(()),
            (Ok(()), Err(_)) => {
                eprintln!("Note: Using tracing-only logging (log crate setup skipped)");
                Ok(())
            }
            (Err(tracing_err), Err(log_err)) => Err(format!(
                "Failed to initialize logging: tracing={tracing_err}, log={log_err}"
            )),
        };

        let _ = INIT_RESULT.set(result);
    });

    match INIT_RESULT.get() {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(e.clone().into()),
        None => Err("Initialization failed unexpectedly".into()),
    }
}

pub fn enable_logging() {
    STATE.lock().enabled = true;
}

pub fn set_verbose_logging(enabled: bool) {
    STATE.lock().verbose = enabled;
}

/// Append log records and tracing spans to `path`
pub fn set_log_file(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    STATE.lock().file = Some(file);
    Ok(())
}

pub fn set_log_to_stderr(enabled: bool) {
    STATE.lock().to_stderr = enabled;
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_records_follow_verbosity() {
        assert!(allows("gradient_gallery::catalog", Level::Warn, false));
        assert!(!allows("gradient_gallery::catalog", Level::Debug, false));
        assert!(allows("gradient_gallery::catalog", Level::Debug, true));
    }

    #[test]
    fn test_http_noise_is_filtered() {
        assert!(!allows("hyper::proto", Level::Info, false));
        assert!(!allows("hyper::proto", Level::Info, true));
        assert!(allows("hyper::proto", Level::Warn, true));
        assert!(allows("tokio_retry", Level::Info, true));
    }
}
