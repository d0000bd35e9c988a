use std::sync::Arc;

use async_trait::async_trait;
use graylog_dispatch::{
    console::ConsoleLogger,
    dispatcher::LogDispatcher,
    record::LogRecord,
    sink::{LogSink, SendError},
};

/// Example of integrating a completely custom transport by implementing
/// the `LogSink` trait directly. Imagine this talks to some proprietary
/// collector for which this crate does not provide a built-in sink.
struct StderrSink;

#[async_trait]
impl LogSink for StderrSink {
    async fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        eprintln!("[my-collector] {}", String::from_utf8_lossy(payload));
        Ok(())
    }

    fn protocol_name(&self) -> &'static str {
        "STDERR"
    }
}

#[tokio::main]
async fn main() {
    let sink: Arc<dyn LogSink> = Arc::new(StderrSink);
    let dispatcher = LogDispatcher::with_sink(sink, ConsoleLogger::default());

    dispatcher
        .warn("custom backend example started", LogRecord::new().with_app_name("demo"))
        .await;
    dispatcher
        .error(
            "simulated error sent via custom backend",
            LogRecord::new().with_app_name("demo").with_device_info("ios/17.4"),
        )
        .await;
}
