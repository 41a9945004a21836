use redis::aio::ConnectionManager;
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::{AsyncCommands, Client};

use crate::error::AppError;

/// Field name under which the JSON envelope is stored in each stream entry.
const BODY_FIELD: &str = "body";

/// Create a Redis connection manager for async operations.
pub async fn connect(redis_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;

    tracing::info!("Connected to Redis");
    Ok(manager)
}

/// One opaque queue record: the transport-assigned entry id plus the raw
/// JSON body. Parsing the body is the consumer's problem, per record.
#[derive(Debug, Clone)]
pub struct QueueRecord {
    pub id: String,
    pub body: String,
}

/// Order notification queue backed by a Redis stream.
///
/// `XADD` gives the producer a transport-assigned message id for the ingress
/// acknowledgment; the consumer reads batches with a blocking `XREAD` and
/// deletes entries once the batch has been iterated, successful or not.
#[derive(Clone)]
pub struct OrderQueue {
    redis: ConnectionManager,
    stream: String,
    last_id: String,
}

impl OrderQueue {
    pub fn new(redis: ConnectionManager, stream: impl Into<String>) -> Self {
        Self {
            redis,
            stream: stream.into(),
            last_id: "0".to_string(),
        }
    }

    /// Append a raw JSON body to the stream.
    ///
    /// Returns the transport-assigned message id (e.g. `1700000000000-0`).
    pub async fn enqueue(&mut self, body: &str) -> Result<String, AppError> {
        let id: String = self
            .redis
            .xadd(&self.stream, "*", &[(BODY_FIELD, body)])
            .await?;
        Ok(id)
    }

    /// Blocking batch read from the stream, advancing past returned entries.
    ///
    /// Returns an empty batch when the blocking timeout elapses with no new
    /// entries. Entries missing the body field are returned with an empty
    /// body and left to the consumer's per-record error handling.
    pub async fn read_batch(
        &mut self,
        count: usize,
        block_ms: u64,
    ) -> Result<Vec<QueueRecord>, AppError> {
        let options = StreamReadOptions::default()
            .count(count)
            .block(block_ms as usize);

        let reply: StreamReadReply = self
            .redis
            .xread_options(&[&self.stream], &[&self.last_id], &options)
            .await?;

        let mut records = Vec::new();
        for key in reply.keys {
            for entry in key.ids {
                let body = entry
                    .map
                    .get(BODY_FIELD)
                    .and_then(|v| redis::from_redis_value::<String>(v).ok())
                    .unwrap_or_default();
                self.last_id = entry.id.clone();
                records.push(QueueRecord { id: entry.id, body });
            }
        }

        Ok(records)
    }

    /// Delete processed entries from the stream.
    ///
    /// Called once per batch regardless of per-record outcomes: failed
    /// records are dropped, not redelivered. Dead-lettering, if wanted,
    /// is an external concern.
    pub async fn delete(&mut self, ids: &[String]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }
        let _removed: i64 = self.redis.xdel(&self.stream, ids).await?;
        Ok(())
    }
}
