use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;

use graylog_dispatch::console::{ConsoleLogger, MemoryWriter};

/// In-memory console shared by the integration tests.
#[derive(Clone, Default)]
pub struct Captured(MemoryWriter);

#[allow(dead_code)]
impl Captured {
    pub fn console(&self) -> ConsoleLogger {
        ConsoleLogger::with_writer(self.0.clone(), LevelFilter::INFO)
    }

    pub fn lines(&self) -> Vec<Value> {
        self.0
            .lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// Console lines at `level`, as `(message, line)` pairs.
    pub fn at_level(&self, level: &str) -> Vec<(String, Value)> {
        self.lines()
            .into_iter()
            .filter(|line| line["level"] == level)
            .map(|line| {
                let message = line["fields"]["message"].as_str().unwrap_or_default();
                (message.to_string(), line)
            })
            .collect()
    }
}
