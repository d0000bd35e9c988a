use crate::backend::{make_sink, CollectorConfig, Protocol};
use crate::console::ConsoleLogger;
use crate::host;
use crate::level::Severity;
use crate::record::LogRecord;
use crate::sink::LogSink;
use crate::tcp::TransportTimeouts;
use chrono::{SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Enriches records with host metadata, writes them to the console and
/// ships them to the collector.
///
/// Every call to [`LogDispatcher::log`] runs on the caller's task: there is
/// no queue and no background worker. Delivery failures are reported on the
/// console only; `log` itself never fails.
///
/// The dispatcher is immutable after construction and can be shared across
/// tasks behind an `Arc`. Each send opens its own socket.
pub struct LogDispatcher {
    /// `None` when the dispatcher wraps a caller-supplied sink.
    collector: Option<CollectorConfig>,
    sink: Arc<dyn LogSink>,
    console: ConsoleLogger,
    app_name: Option<String>,
    /// Records handed to `log`.
    total_events: AtomicU64,
    /// Payloads accepted by the sink.
    sent_events: AtomicU64,
    /// Payloads dropped because serialization or delivery failed.
    failed_events: AtomicU64,
}

/// Snapshot of a dispatcher's delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub total: u64,
    pub sent: u64,
    pub failed: u64,
}

impl LogDispatcher {
    /// Build a dispatcher for `host:port` with a protocol token.
    ///
    /// The token must be exactly `"udp"` or `"tcp"`. Anything else is
    /// reported as a console warning and the dispatcher falls back to UDP.
    /// No connection is opened here.
    pub fn new(host: impl Into<String>, port: impl Into<String>, protocol: &str) -> Self {
        Self::with_console(host, port, protocol, ConsoleLogger::default())
    }

    /// Same as [`LogDispatcher::new`], writing to the given console instead
    /// of standard output.
    pub fn with_console(
        host: impl Into<String>,
        port: impl Into<String>,
        protocol: &str,
        console: ConsoleLogger,
    ) -> Self {
        let protocol = resolve_protocol(&console, protocol);
        Self::from_parts(
            CollectorConfig::new(host, port, protocol),
            TransportTimeouts::default(),
            console,
            None,
        )
    }

    pub(crate) fn from_parts(
        collector: CollectorConfig,
        timeouts: TransportTimeouts,
        console: ConsoleLogger,
        app_name: Option<String>,
    ) -> Self {
        let sink = make_sink(&collector, &timeouts);
        Self::assemble(Some(collector), sink, console, app_name)
    }

    /// Build a dispatcher around a custom [`LogSink`].
    ///
    /// Useful for tests and for backends this crate does not ship. Such a
    /// dispatcher has no [`CollectorConfig`]; [`LogDispatcher::transport_name`]
    /// reports the sink's own name.
    pub fn with_sink(sink: Arc<dyn LogSink>, console: ConsoleLogger) -> Self {
        Self::assemble(None, sink, console, None)
    }

    fn assemble(
        collector: Option<CollectorConfig>,
        sink: Arc<dyn LogSink>,
        console: ConsoleLogger,
        app_name: Option<String>,
    ) -> Self {
        LogDispatcher {
            collector,
            sink,
            console,
            app_name,
            total_events: AtomicU64::new(0),
            sent_events: AtomicU64::new(0),
            failed_events: AtomicU64::new(0),
        }
    }

    /// Application name filled into records that leave `app_name` empty.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Collector address and protocol, unless built with [`LogDispatcher::with_sink`].
    pub fn collector(&self) -> Option<&CollectorConfig> {
        self.collector.as_ref()
    }

    pub fn protocol(&self) -> Option<Protocol> {
        self.collector.as_ref().map(|c| c.protocol)
    }

    /// Name of the transport records are shipped over (`UDP`, `TCP`, ...).
    pub fn transport_name(&self) -> &'static str {
        self.sink.protocol_name()
    }

    pub fn console(&self) -> &ConsoleLogger {
        &self.console
    }

    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            total: self.total_events.load(Ordering::Relaxed),
            sent: self.sent_events.load(Ordering::Relaxed),
            failed: self.failed_events.load(Ordering::Relaxed),
        }
    }

    /// Enrich, print and ship a single record.
    ///
    /// **Parameters**
    /// - `level`: severity bucket; string tokens go through
    ///   [`Severity::from_token`], so unknown tokens become `WARN`.
    /// - `message`: human readable text, replaces `record.message`.
    /// - `record`: caller fields. `timestamp`, `level`, `hostname` and
    ///   `ip_address` are overwritten.
    pub async fn log(&self, level: impl Into<Severity>, message: &str, record: LogRecord) {
        let severity = level.into();
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let record = self.enrich(severity, message, record);
        let payload = match record.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                self.console.scope(|| {
                    tracing::error!(error = %e, "failed to serialize log record, dropping it");
                });
                return;
            }
        };

        self.console.emit(severity, &String::from_utf8_lossy(&payload));
        self.ship(&payload).await;
    }

    pub async fn info(&self, message: &str, record: LogRecord) {
        self.log(Severity::Info, message, record).await
    }

    pub async fn error(&self, message: &str, record: LogRecord) {
        self.log(Severity::Error, message, record).await
    }

    pub async fn debug(&self, message: &str, record: LogRecord) {
        self.log(Severity::Debug, message, record).await
    }

    pub async fn warn(&self, message: &str, record: LogRecord) {
        self.log(Severity::Warn, message, record).await
    }

    fn enrich(&self, severity: Severity, message: &str, mut record: LogRecord) -> LogRecord {
        record.timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        record.message = message.to_string();
        record.level = severity.as_str().to_string();
        if record.app_name.is_empty() {
            if let Some(app_name) = &self.app_name {
                record.app_name = app_name.clone();
            }
        }
        record.hostname = host::hostname();
        record.ip_address = host::local_ipv4();
        record
    }

    async fn ship(&self, payload: &[u8]) {
        let transport = self.sink.protocol_name();
        match self.sink.send(payload).await {
            Ok(()) => {
                self.sent_events.fetch_add(1, Ordering::Relaxed);
                self.console.scope(|| {
                    tracing::info!(transport, "log sent successfully to Graylog via {}", transport);
                });
            }
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                self.console.scope(|| {
                    tracing::warn!(transport, error = %e, "failed to send log via {}", transport);
                });
            }
        }
    }
}

fn resolve_protocol(console: &ConsoleLogger, token: &str) -> Protocol {
    let (protocol, err) = Protocol::parse_or_default(token);
    if let Some(err) = err {
        console.scope(|| {
            tracing::warn!(error = %err, "invalid protocol, defaulting to {}", protocol);
        });
    }
    protocol
}

impl std::fmt::Debug for LogDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogDispatcher")
            .field("collector", &self.collector)
            .field("transport", &self.transport_name())
            .field("app_name", &self.app_name)
            .field("stats", &self.stats())
            .finish()
    }
}
