//! Queue consumer: reads order-notification batches from the Redis stream
//! and hands each record to the dispatcher.
//!
//! Records are independent: a parse failure is logged and the record is
//! dropped, the rest of the batch still runs, and the batch as a whole
//! always counts as processed. Entries are deleted after iteration
//! regardless of per-record outcome, so there is no redelivery loop;
//! dead-lettering is an external concern.

use std::time::Duration;

use ruchi_common::config::AppConfig;
use ruchi_common::queue::{OrderQueue, QueueRecord};
use ruchi_common::types::NotificationEnvelope;

use crate::dispatcher::Dispatch;

/// Per-batch accounting, for logs only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Process one batch of queue records, isolating per-record failures.
pub async fn process_batch<D: Dispatch>(dispatcher: &D, records: &[QueueRecord]) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for record in records {
        match serde_json::from_str::<NotificationEnvelope>(&record.body) {
            Ok(envelope) => {
                tracing::info!(
                    record_id = %record.id,
                    order_id = %envelope.order_data.id,
                    "Processing order"
                );
                dispatcher
                    .dispatch(envelope.mobile.as_deref(), &envelope.order_data)
                    .await;
                summary.processed += 1;
            }
            Err(err) => {
                tracing::warn!(
                    record_id = %record.id,
                    error = %err,
                    "Error processing record, dropping it"
                );
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Long-running consumer loop over the order notification stream.
pub struct Consumer<D> {
    queue: OrderQueue,
    dispatcher: D,
    batch_size: usize,
    block_ms: u64,
}

impl<D: Dispatch> Consumer<D> {
    pub fn new(queue: OrderQueue, dispatcher: D, config: &AppConfig) -> Self {
        Self {
            queue,
            dispatcher,
            batch_size: config.worker_batch_size,
            block_ms: config.worker_block_ms,
        }
    }

    /// Run until the task is cancelled. Transport errors are logged and
    /// retried after a short pause; they never abort the loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            batch_size = self.batch_size,
            block_ms = self.block_ms,
            "Queue consumer started"
        );

        loop {
            let records = match self.queue.read_batch(self.batch_size, self.block_ms).await {
                Ok(records) => records,
                Err(err) => {
                    tracing::error!(error = %err, "Queue read failed, retrying");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            if records.is_empty() {
                continue;
            }

            let summary = process_batch(&self.dispatcher, &records).await;
            tracing::info!(
                records = records.len(),
                processed = summary.processed,
                failed = summary.failed,
                "Batch processed"
            );

            let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
            if let Err(err) = self.queue.delete(&ids).await {
                tracing::warn!(error = %err, "Failed to delete processed records");
            }
        }
    }
}
