use crate::backend::{CollectorConfig, Protocol};
use crate::console::{ConsoleConfig, ConsoleLogger};
use crate::dispatcher::LogDispatcher;
use crate::tcp::TransportTimeouts;

/// Full dispatcher configuration.
///
/// **Fields**
/// - `collector`: host, port and transport of the Graylog input.
/// - `timeouts`: connect/write deadlines for the TCP transport.
/// - `console`: whether and how verbosely records are echoed locally.
/// - `app_name`: default `appname` for records that leave it empty.
#[derive(Clone, Debug, Default)]
pub struct DispatcherConfig {
    pub collector: CollectorConfig,
    pub timeouts: TransportTimeouts,
    pub console: ConsoleConfig,
    pub app_name: Option<String>,
}

/// Build a dispatcher from a [`DispatcherConfig`].
///
/// The protocol is already typed here, so no fallback warning is needed.
/// No connection is opened; each `log` call opens its own socket.
pub fn init_dispatcher_with_config(config: DispatcherConfig) -> LogDispatcher {
    let console = ConsoleLogger::from_config(&config.console);
    init_dispatcher_with_console(config, console)
}

/// Like [`init_dispatcher_with_config`], but writes console output to
/// `console` and ignores `config.console`.
pub fn init_dispatcher_with_console(
    config: DispatcherConfig,
    console: ConsoleLogger,
) -> LogDispatcher {
    LogDispatcher::from_parts(config.collector, config.timeouts, console, config.app_name)
}

/// Build a dispatcher for `host:port` with sensible defaults.
///
/// **Parameters**
/// - `host`, `port`: collector address; the port is resolved lazily.
/// - `protocol`: `"udp"` or `"tcp"`. Any other token is reported on the
///   console and replaced by UDP.
///
/// Equivalent to [`LogDispatcher::new`]. This is the recommended entrypoint
/// for typical services.
pub fn init_dispatcher(
    host: impl Into<String>,
    port: impl Into<String>,
    protocol: &str,
) -> LogDispatcher {
    LogDispatcher::new(host, port, protocol)
}

impl DispatcherConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>, protocol: Protocol) -> Self {
        DispatcherConfig {
            collector: CollectorConfig::new(host, port, protocol),
            ..Default::default()
        }
    }
}
