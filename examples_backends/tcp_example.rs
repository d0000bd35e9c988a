use graylog_dispatch::init::{init_dispatcher_with_config, DispatcherConfig};
use graylog_dispatch::record::LogRecord;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads GRAYLOG_URL (e.g. tcp://127.0.0.1:12201) or GRAYLOG_HOST /
    // GRAYLOG_PORT / GRAYLOG_PROTOCOL from the environment.
    let config = DispatcherConfig::from_env()?;
    let dispatcher = init_dispatcher_with_config(config);

    dispatcher
        .info(
            "settlement batch closed",
            LogRecord::new()
                .with_bank_code("014")
                .with_reference_id("batch-77")
                .with_params("count=120", "amount=98000", ""),
        )
        .await;

    println!("{:?}", dispatcher.stats());
    Ok(())
}
