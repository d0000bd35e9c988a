use crate::sink::{LogSink, SendError};
use async_trait::async_trait;

/// A sink that simply drops all payloads.
///
/// Useful for measuring the overhead of enrichment and console output
/// without any network I/O, and for tests that don't care about delivery.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn send(&self, _payload: &[u8]) -> Result<(), SendError> {
        Ok(())
    }

    fn protocol_name(&self) -> &'static str {
        "NOOP"
    }
}
