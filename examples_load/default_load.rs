use std::sync::Arc;
use std::time::Instant;

use graylog_dispatch::console::ConsoleLogger;
use graylog_dispatch::dispatcher::LogDispatcher;
use graylog_dispatch::noop_sink::NoopSink;
use graylog_dispatch::record::LogRecord;

#[tokio::main]
async fn main() {
    // Console disabled and nothing shipped: measures enrichment and
    // serialization only.
    let dispatcher = LogDispatcher::with_sink(Arc::new(NoopSink), ConsoleLogger::disabled())
        .with_app_name("load-test");

    let n: u64 = 10_000;
    let start = Instant::now();

    for i in 0..n {
        let record = LogRecord::new()
            .with_transaction_id(format!("tx-{i}"))
            .with_channel("bench");
        dispatcher.log("ERROR", "default load test error", record).await;
    }

    let elapsed = start.elapsed();
    println!("default config: dispatched {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
    println!("{:?}", dispatcher.stats());
}
