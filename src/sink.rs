use async_trait::async_trait;
use std::io;
use std::time::Duration;

/// Destination for serialized log payloads.
///
/// Implementations transport one JSON payload per call to a concrete
/// backend (Graylog over UDP or TCP, a test double, ...). The dispatcher
/// awaits `send` on the calling task and only reports the outcome on the
/// console; errors never reach the code that logged the event.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver a single serialized record.
    ///
    /// **Parameters**
    /// - `payload`: UTF-8 JSON object produced by the dispatcher, without
    ///   any framing. Sinks add whatever framing their wire format needs.
    ///
    /// **Returns**
    /// - `Ok(())` once the payload has been handed to the network.
    /// - `Err(..)` when resolving, connecting or writing failed. The
    ///   payload is dropped; there is no retry.
    async fn send(&self, payload: &[u8]) -> Result<(), SendError>;

    /// Short transport name used in console diagnostics, e.g. `"UDP"`.
    fn protocol_name(&self) -> &'static str;
}

/// Error returned by a [`LogSink`] when a payload could not be delivered.
#[derive(thiserror::Error, Debug)]
pub enum SendError {
    #[error("failed to resolve collector address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("collector address {0} did not resolve to any socket address")]
    NoAddress(String),

    #[error("failed to connect to collector {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write payload to collector {address}: {source}")]
    Write {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("{op} to collector {address} timed out after {after:?}")]
    Timeout {
        op: &'static str,
        address: String,
        after: Duration,
    },
}

/// Resolve `host:port` into every socket address it names, in resolver order.
pub(crate) async fn resolve_collector_all(
    address: &str,
) -> Result<Vec<std::net::SocketAddr>, SendError> {
    let addrs: Vec<_> = tokio::net::lookup_host(address)
        .await
        .map_err(|source| SendError::Resolve {
            address: address.to_string(),
            source,
        })?
        .collect();
    if addrs.is_empty() {
        return Err(SendError::NoAddress(address.to_string()));
    }
    Ok(addrs)
}

/// Resolve `host:port` and return the first socket address.
pub(crate) async fn resolve_collector(address: &str) -> Result<std::net::SocketAddr, SendError> {
    let addrs = resolve_collector_all(address).await?;
    Ok(addrs[0])
}
