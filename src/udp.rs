use crate::sink::{resolve_collector, LogSink, SendError};
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Graylog sink that sends every payload as a single UDP datagram.
///
/// A fresh socket is bound for each call and dropped right after the
/// datagram is written. Nothing waits for the collector, so a missing
/// listener never stalls the caller.
#[derive(Clone, Debug)]
pub struct UdpSink {
    /// Collector address in `host:port` form.
    address: String,
}

impl UdpSink {
    pub fn new(address: impl Into<String>) -> Self {
        UdpSink {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

fn unspecified_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}

#[async_trait]
impl LogSink for UdpSink {
    async fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        let target = resolve_collector(&self.address).await?;
        let connect_err = |source| SendError::Connect {
            address: self.address.clone(),
            source,
        };

        let socket = UdpSocket::bind(unspecified_for(&target))
            .await
            .map_err(connect_err)?;
        socket.connect(target).await.map_err(connect_err)?;
        socket
            .send(payload)
            .await
            .map_err(|source| SendError::Write {
                address: self.address.clone(),
                source,
            })?;
        Ok(())
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn sends_payload_as_single_datagram_without_terminator() {
        let collector = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let sink = UdpSink::new(collector.local_addr().unwrap().to_string());

        sink.send(br#"{"level":"INFO"}"#).await.unwrap();

        let mut buf = [0u8; 1024];
        let (len, _) = tokio::time::timeout(Duration::from_secs(2), collector.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..len], br#"{"level":"INFO"}"#);
    }

    #[tokio::test]
    async fn unresolvable_host_is_reported() {
        let sink = UdpSink::new("collector.invalid:12201");
        let err = sink.send(b"{}").await.unwrap_err();
        assert!(matches!(err, SendError::Resolve { .. } | SendError::NoAddress(_)));
    }

    #[tokio::test]
    async fn missing_port_is_reported() {
        let sink = UdpSink::new("127.0.0.1");
        assert!(sink.send(b"{}").await.is_err());
    }
}
