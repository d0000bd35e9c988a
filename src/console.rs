use crate::level::Severity;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Console output settings.
///
/// **Fields**
/// - `enable_stdout`: when `false` the dispatcher stays silent locally and
///   only ships records to the collector.
/// - `max_level`: most verbose level written to the console. Defaults to
///   `INFO`, which shows records, delivery confirmations and failures but
///   hides `DEBUG` records.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub enable_stdout: bool,
    pub max_level: LevelFilter,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
            max_level: LevelFilter::INFO,
        }
    }
}

/// Console writer owned by a single dispatcher.
///
/// Wraps a private `tracing` [`Dispatch`] built from the `fmt` JSON
/// formatter. Events are emitted under this dispatch only, so nothing is
/// installed as the process-wide subscriber and several dispatchers can
/// write to different destinations side by side.
#[derive(Clone)]
pub struct ConsoleLogger {
    dispatch: Dispatch,
}

impl ConsoleLogger {
    /// JSON lines on standard output.
    pub fn stdout(max_level: LevelFilter) -> Self {
        Self::with_writer(std::io::stdout, max_level)
    }

    /// JSON lines on any [`MakeWriter`] (files, in-memory buffers, ...).
    pub fn with_writer<W>(make_writer: W, max_level: LevelFilter) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(make_writer)
            .with_max_level(max_level)
            .with_ansi(false)
            .finish();
        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// A console that drops everything.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        if config.enable_stdout {
            Self::stdout(config.max_level)
        } else {
            Self::disabled()
        }
    }

    /// Run `f` with this console as the current subscriber, so `tracing`
    /// macros inside it are written here.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Write one record line in the bucket matching `severity`.
    pub fn emit(&self, severity: Severity, line: &str) {
        self.scope(|| match severity {
            Severity::Info => tracing::info!("{}", line),
            Severity::Error => tracing::error!("{}", line),
            Severity::Debug => tracing::debug!("{}", line),
            Severity::Warn => tracing::warn!("{}", line),
        });
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::from_config(&ConsoleConfig::default())
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger").finish_non_exhaustive()
    }
}

/// Console destination that keeps every written line in memory.
///
/// Clones share the same buffer, so one handle can be given to
/// [`ConsoleLogger::with_writer`] and another kept to read the output back.
#[derive(Clone, Debug, Default)]
pub struct MemoryWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MemoryWriter {
    type Writer = MemoryWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
