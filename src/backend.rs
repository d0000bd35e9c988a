use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::sink::LogSink;
use crate::tcp::{TcpSink, TransportTimeouts};
use crate::udp::UdpSink;

/// Transports supported for shipping records to the collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    #[default]
    Udp,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
        }
    }

    /// Parse a protocol token, falling back to UDP on unknown input.
    ///
    /// The rejected token is handed back so the caller can warn about it.
    pub fn parse_or_default(token: &str) -> (Protocol, Option<ProtocolError>) {
        match token.parse() {
            Ok(protocol) => (protocol, None),
            Err(err) => (Protocol::default(), Some(err)),
        }
    }
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    /// Exactly `"udp"` or `"tcp"`; matching is case-sensitive.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "udp" => Ok(Protocol::Udp),
            "tcp" => Ok(Protocol::Tcp),
            other => Err(ProtocolError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a protocol token is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown protocol {0:?}, expected \"udp\" or \"tcp\"")]
    Unknown(String),
}

/// Where and how records are shipped.
///
/// The port is kept as a string and only resolved at send time, so a bad
/// port surfaces as a delivery failure rather than a construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub host: String,
    pub port: String,
    pub protocol: Protocol,
}

impl CollectorConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>, protocol: Protocol) -> Self {
        CollectorConfig {
            host: host.into(),
            port: port.into(),
            protocol,
        }
    }

    /// `host:port` as handed to the resolver.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig::new("127.0.0.1", "12201", Protocol::Udp)
    }
}

/// Parse a collector URL and infer the transport from its scheme.
///
/// Examples:
/// - "udp://graylog.internal:12201"
/// - "tcp://10.0.0.5:12201"
pub fn parse_collector_url(url: &str) -> Result<CollectorConfig, DsnError> {
    let (scheme, rest) = url.split_once("://").ok_or(DsnError::UnknownScheme)?;
    let protocol = match scheme.to_ascii_lowercase().as_str() {
        "udp" => Protocol::Udp,
        "tcp" => Protocol::Tcp,
        _ => return Err(DsnError::UnknownScheme),
    };

    let authority = rest.trim_end_matches('/');
    let (host, port) = authority
        .rsplit_once(':')
        .filter(|(host, port)| !host.is_empty() && !port.is_empty() && !port.contains(']'))
        .ok_or_else(|| DsnError::MissingPort(url.to_string()))?;

    // Bracketed IPv6 literals keep their brackets so `host:port` stays valid.
    Ok(CollectorConfig::new(host, port, protocol))
}

/// Error type returned when parsing a collector URL.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DsnError {
    #[error("unknown or unsupported collector URL scheme")]
    UnknownScheme,

    #[error("collector URL {0:?} must have the form scheme://host:port")]
    MissingPort(String),
}

/// Create the [`LogSink`] matching the configured protocol.
pub fn make_sink(cfg: &CollectorConfig, timeouts: &TransportTimeouts) -> Arc<dyn LogSink> {
    match cfg.protocol {
        Protocol::Udp => Arc::new(UdpSink::new(cfg.address())),
        Protocol::Tcp => Arc::new(TcpSink::with_timeouts(cfg.address(), *timeouts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("udp", Protocol::Udp)]
    #[case("tcp", Protocol::Tcp)]
    fn parses_known_protocols(#[case] token: &str, #[case] expected: Protocol) {
        assert_eq!(token.parse::<Protocol>(), Ok(expected));
        assert_eq!(Protocol::parse_or_default(token), (expected, None));
    }

    #[rstest]
    #[case("carrier-pigeon")]
    #[case("UDP")]
    #[case("Tcp")]
    #[case("")]
    fn unknown_protocols_fall_back_to_udp(#[case] token: &str) {
        let (protocol, err) = Protocol::parse_or_default(token);
        assert_eq!(protocol, Protocol::Udp);
        assert_eq!(err, Some(ProtocolError::Unknown(token.to_string())));
    }

    #[test]
    fn collector_url_selects_transport() {
        let cfg = parse_collector_url("tcp://graylog.internal:12201").unwrap();
        assert_eq!(cfg, CollectorConfig::new("graylog.internal", "12201", Protocol::Tcp));
        assert_eq!(cfg.address(), "graylog.internal:12201");

        let cfg = parse_collector_url("UDP://10.0.0.1:5555/").unwrap();
        assert_eq!(cfg.protocol, Protocol::Udp);
        assert_eq!(cfg.port, "5555");
    }

    #[test]
    fn collector_url_keeps_ipv6_brackets() {
        let cfg = parse_collector_url("udp://[::1]:12201").unwrap();
        assert_eq!(cfg.host, "[::1]");
        assert_eq!(cfg.address(), "[::1]:12201");
    }

    #[rstest]
    #[case("http://graylog:12201", DsnError::UnknownScheme)]
    #[case("graylog:12201", DsnError::UnknownScheme)]
    #[case("tcp://graylog", DsnError::MissingPort("tcp://graylog".to_string()))]
    #[case("tcp://graylog:", DsnError::MissingPort("tcp://graylog:".to_string()))]
    fn rejects_malformed_urls(#[case] url: &str, #[case] expected: DsnError) {
        assert_eq!(parse_collector_url(url), Err(expected));
    }

    #[test]
    fn sink_matches_protocol() {
        let timeouts = TransportTimeouts::default();
        let udp = make_sink(&CollectorConfig::default(), &timeouts);
        assert_eq!(udp.protocol_name(), "UDP");

        let tcp = make_sink(
            &CollectorConfig::new("127.0.0.1", "12201", Protocol::Tcp),
            &timeouts,
        );
        assert_eq!(tcp.protocol_name(), "TCP");
    }
}
