use graylog_dispatch::env::{env_or, GRAYLOG_HOST_ENV};
use graylog_dispatch::init::init_dispatcher;
use graylog_dispatch::record::LogRecord;

#[tokio::main]
async fn main() {
    // Point this at a Graylog GELF UDP input.
    let host = env_or(GRAYLOG_HOST_ENV, "127.0.0.1");
    let dispatcher = init_dispatcher(host, "12201", "udp");

    dispatcher
        .log(
            "INFO",
            "order placed",
            LogRecord::new()
                .with_app_name("checkout")
                .with_transaction_id("tx-1001")
                .with_channel("mobile"),
        )
        .await;

    dispatcher
        .log(
            "ERROR",
            "payment declined",
            LogRecord::new()
                .with_app_name("checkout")
                .with_rrn("123456789012"),
        )
        .await;
}
