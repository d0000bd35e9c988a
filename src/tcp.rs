use crate::sink::{resolve_collector_all, LogSink, SendError};
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Connect and write deadlines applied to stream transports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub connect: Duration,
    pub write: Duration,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            write: Duration::from_secs(5),
        }
    }
}

/// Graylog sink that opens one TCP connection per payload.
///
/// The payload is written followed by a single `\n` (GELF TCP framing),
/// then the connection is shut down. Name resolution plus connect, and the
/// write, are each bounded by [`TransportTimeouts`].
#[derive(Clone, Debug)]
pub struct TcpSink {
    address: String,
    timeouts: TransportTimeouts,
}

impl TcpSink {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_timeouts(address, TransportTimeouts::default())
    }

    pub fn with_timeouts(address: impl Into<String>, timeouts: TransportTimeouts) -> Self {
        TcpSink {
            address: address.into(),
            timeouts,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connect(&self) -> Result<TcpStream, SendError> {
        let attempt = async {
            let addrs = resolve_collector_all(&self.address).await?;
            connect_any(&addrs).await.map_err(|source| SendError::Connect {
                address: self.address.clone(),
                source,
            })
        };
        within(self.timeouts.connect, "connect", &self.address, attempt).await
    }
}

/// Try each address in order and return the first stream that connects.
///
/// When every address fails, the error of the last attempt is returned.
pub(crate) async fn connect_any(addrs: &[SocketAddr]) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(*addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no addresses to connect to")
    }))
}

async fn within<T, F>(
    after: Duration,
    op: &'static str,
    address: &str,
    fut: F,
) -> Result<T, SendError>
where
    F: Future<Output = Result<T, SendError>>,
{
    match timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(SendError::Timeout {
            op,
            address: address.to_string(),
            after,
        }),
    }
}

/// Frame a payload for the TCP wire: the JSON bytes plus one newline.
pub fn frame_payload(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(payload.len() + 1);
    framed.extend_from_slice(payload);
    framed.push(b'\n');
    framed
}

#[async_trait]
impl LogSink for TcpSink {
    async fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        let mut stream = self.connect().await?;
        let framed = frame_payload(payload);

        let write = async {
            let written: io::Result<()> = async {
                stream.write_all(&framed).await?;
                stream.shutdown().await
            }
            .await;
            written.map_err(|source| SendError::Write {
                address: self.address.clone(),
                source,
            })
        };
        within(self.timeouts.write, "write", &self.address, write).await
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
