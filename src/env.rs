//! Environment variable names used by this crate for convenient
//! configuration of the dispatcher from services.
//!
//! These are purely helpers; [`LogDispatcher`](crate::dispatcher::LogDispatcher)
//! itself never reads the environment.

use std::time::Duration;

use crate::backend::{parse_collector_url, CollectorConfig, DsnError, Protocol, ProtocolError};
use crate::init::DispatcherConfig;

/// Collector URL, e.g. `udp://graylog:12201`. Takes precedence over
/// host/port/protocol.
pub const GRAYLOG_URL_ENV: &str = "GRAYLOG_URL";

/// Collector host name or IP.
pub const GRAYLOG_HOST_ENV: &str = "GRAYLOG_HOST";

/// Collector port.
pub const GRAYLOG_PORT_ENV: &str = "GRAYLOG_PORT";

/// `udp` or `tcp`.
pub const GRAYLOG_PROTOCOL_ENV: &str = "GRAYLOG_PROTOCOL";

/// Default `appname` for records that leave it empty.
pub const GRAYLOG_APP_NAME_ENV: &str = "GRAYLOG_APP_NAME";

/// TCP connect deadline in milliseconds.
pub const GRAYLOG_TCP_CONNECT_TIMEOUT_MS_ENV: &str = "GRAYLOG_TCP_CONNECT_TIMEOUT_MS";

/// TCP write deadline in milliseconds.
pub const GRAYLOG_TCP_WRITE_TIMEOUT_MS_ENV: &str = "GRAYLOG_TCP_WRITE_TIMEOUT_MS";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Error returned when the environment holds an unusable value.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("GRAYLOG_URL: {0}")]
    Url(#[from] DsnError),

    #[error("GRAYLOG_PROTOCOL: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("{key} must be a whole number of milliseconds, got {value:?}")]
    Timeout { key: &'static str, value: String },
}

impl DispatcherConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unset variables keep their [`Default`] values. Unlike
    /// [`LogDispatcher::new`](crate::dispatcher::LogDispatcher::new), a bad
    /// protocol here is an error: configuration read at startup should fail
    /// loudly.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DispatcherConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DispatcherConfig::default();

        config.collector = match lookup(GRAYLOG_URL_ENV) {
            Some(url) => parse_collector_url(&url)?,
            None => {
                let defaults = CollectorConfig::default();
                let protocol = match lookup(GRAYLOG_PROTOCOL_ENV) {
                    Some(token) => token.parse::<Protocol>()?,
                    None => defaults.protocol,
                };
                CollectorConfig::new(
                    lookup(GRAYLOG_HOST_ENV).unwrap_or(defaults.host),
                    lookup(GRAYLOG_PORT_ENV).unwrap_or(defaults.port),
                    protocol,
                )
            }
        };

        if let Some(ms) = millis(&lookup, GRAYLOG_TCP_CONNECT_TIMEOUT_MS_ENV)? {
            config.timeouts.connect = ms;
        }
        if let Some(ms) = millis(&lookup, GRAYLOG_TCP_WRITE_TIMEOUT_MS_ENV)? {
            config.timeouts.write = ms;
        }

        config.app_name = lookup(GRAYLOG_APP_NAME_ENV).filter(|name| !name.is_empty());
        Ok(config)
    }
}

fn millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::Timeout { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = DispatcherConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.collector, CollectorConfig::default());
        assert!(config.app_name.is_none());
    }

    #[test]
    fn host_port_protocol_are_read() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (GRAYLOG_HOST_ENV, "graylog.internal"),
            (GRAYLOG_PORT_ENV, "12202"),
            (GRAYLOG_PROTOCOL_ENV, "tcp"),
            (GRAYLOG_APP_NAME_ENV, "payments"),
            (GRAYLOG_TCP_CONNECT_TIMEOUT_MS_ENV, "250"),
        ]))
        .unwrap();

        assert_eq!(
            config.collector,
            CollectorConfig::new("graylog.internal", "12202", Protocol::Tcp)
        );
        assert_eq!(config.app_name.as_deref(), Some("payments"));
        assert_eq!(config.timeouts.connect, Duration::from_millis(250));
        assert_eq!(config.timeouts.write, Duration::from_secs(5));
    }

    #[test]
    fn url_takes_precedence() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (GRAYLOG_URL_ENV, "tcp://10.1.1.1:5000"),
            (GRAYLOG_HOST_ENV, "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.collector, CollectorConfig::new("10.1.1.1", "5000", Protocol::Tcp));
    }

    #[test]
    fn bad_values_are_errors() {
        let err = DispatcherConfig::from_lookup(lookup(&[(GRAYLOG_PROTOCOL_ENV, "carrier-pigeon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Protocol(_)));

        let write_timeout = lookup(&[(GRAYLOG_TCP_WRITE_TIMEOUT_MS_ENV, "soon")]);
        let err = DispatcherConfig::from_lookup(write_timeout).unwrap_err();
        assert!(matches!(err, ConfigError::Timeout { key: GRAYLOG_TCP_WRITE_TIMEOUT_MS_ENV, .. }));

        let err = DispatcherConfig::from_lookup(lookup(&[(GRAYLOG_URL_ENV, "http://x:1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Url(DsnError::UnknownScheme)));
    }

    #[test]
    fn env_or_falls_back() {
        assert_eq!(env_or("GRAYLOG_DISPATCH_SURELY_UNSET_VAR", "fallback"), "fallback");
    }
}
