use ruchi_common::config::AppConfig;
use ruchi_common::queue::{self, OrderQueue};
use ruchi_worker::consumer::Consumer;
use ruchi_worker::dispatcher::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ruchi_worker=info,ruchi_notifier=info,ruchi_invoice=info".into()),
        )
        .json()
        .init();

    tracing::info!("RuchiServ worker starting...");

    // Load configuration (QUEUE_STREAM absence is startup-fatal)
    let config = AppConfig::from_env()?;

    // Connect to the queue transport
    let redis = queue::connect(&config.redis_url).await?;
    let order_queue = OrderQueue::new(redis, config.queue_stream.clone());

    let dispatcher = Dispatcher::from_config(&config);
    let mut consumer = Consumer::new(order_queue, dispatcher, &config);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = consumer.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Consumer exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("RuchiServ worker stopped.");
    Ok(())
}
