//! Queue round-trip tests for the worker.
//!
//! Requires a running Redis instance.
//!
//! ```bash
//! REDIS_URL="redis://localhost:6379" \
//!   cargo test -p ruchi-worker --test integration -- --ignored --nocapture
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use ruchi_common::queue::{self, OrderQueue};
use ruchi_common::types::Order;
use ruchi_worker::consumer::process_batch;
use ruchi_worker::dispatcher::Dispatch;

#[derive(Default)]
struct RecordingDispatch {
    orders: Mutex<Vec<(Option<String>, String)>>,
}

#[async_trait]
impl Dispatch for RecordingDispatch {
    async fn dispatch(&self, mobile: Option<&str>, order: &Order) {
        self.orders
            .lock()
            .unwrap()
            .push((mobile.map(str::to_string), order.id.clone()));
    }
}

async fn test_queue() -> OrderQueue {
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let redis = queue::connect(&redis_url).await.unwrap();
    OrderQueue::new(redis, format!("test:orders:{}", Uuid::new_v4()))
}

#[tokio::test]
#[ignore]
async fn test_enqueue_read_dispatch_round_trip() {
    let mut queue = test_queue().await;

    let payload = r#"{"mobile":"9876543210","orderData":{"id":"ORD-77","customerName":"Asha","date":"2024-11-02"}}"#;
    let message_id = queue.enqueue(payload).await.unwrap();

    let records = queue.read_batch(10, 100).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, message_id);

    let dispatcher = RecordingDispatch::default();
    let summary = process_batch(&dispatcher, &records).await;
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 0);

    let dispatched = dispatcher.orders.lock().unwrap();
    assert_eq!(
        *dispatched,
        vec![(Some("9876543210".to_string()), "ORD-77".to_string())]
    );
}

#[tokio::test]
#[ignore]
async fn test_deleted_records_are_not_redelivered() {
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let stream = format!("test:orders:{}", Uuid::new_v4());

    let redis = queue::connect(&redis_url).await.unwrap();
    let mut queue = OrderQueue::new(redis.clone(), stream.clone());

    queue.enqueue("{not json").await.unwrap();
    queue
        .enqueue(r#"{"orderData":{"id":"ORD-78"}}"#)
        .await
        .unwrap();

    let records = queue.read_batch(10, 100).await.unwrap();
    assert_eq!(records.len(), 2);

    let dispatcher = RecordingDispatch::default();
    let summary = process_batch(&dispatcher, &records).await;
    // The malformed record fails, the batch still succeeds.
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);

    // Deletion covers failed records too: a fresh consumer starting from
    // the beginning of the stream sees nothing.
    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    queue.delete(&ids).await.unwrap();

    let mut fresh = OrderQueue::new(redis, stream);
    let redelivered = fresh.read_batch(10, 100).await.unwrap();
    assert!(redelivered.is_empty());
}
