use serde::Deserialize;

/// Global application configuration loaded from environment variables.
///
/// Constructed once at process start and passed by reference into the
/// ingress router, the queue consumer and the channel clients. Business
/// logic never reads the environment directly.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Redis connection string (queue transport)
    pub redis_url: String,

    /// Redis stream key holding queued order notifications
    pub queue_stream: String,

    /// WhatsApp Cloud API bearer token
    pub meta_token: Option<String>,

    /// WhatsApp sender phone-number id
    pub meta_phone_id: Option<String>,

    /// Resend API key for email delivery
    pub resend_api_key: Option<String>,

    /// Verified sender email identity
    pub sender_email: Option<String>,

    /// 2Factor API key for SMS fallback
    pub sms_api_key: Option<String>,

    /// Ingress API listen port (default: 3000)
    pub api_port: u16,

    /// Number of queue records fetched per consumer read (default: 10)
    pub worker_batch_size: usize,

    /// Consumer blocking-read timeout in milliseconds (default: 5000)
    pub worker_block_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `QUEUE_STREAM` is the single hard requirement; every channel
    /// credential is optional and its absence merely disables that channel.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            queue_stream: std::env::var("QUEUE_STREAM")
                .map_err(|_| anyhow::anyhow!("QUEUE_STREAM environment variable is required"))?,
            meta_token: std::env::var("META_TOKEN").ok(),
            meta_phone_id: std::env::var("META_PHONE_ID").ok(),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            sender_email: std::env::var("SENDER_EMAIL").ok(),
            sms_api_key: std::env::var("SMS_API_KEY").ok(),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            worker_batch_size: std::env::var("WORKER_BATCH_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WORKER_BATCH_SIZE must be a valid usize"))?,
            worker_block_ms: std::env::var("WORKER_BLOCK_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WORKER_BLOCK_MS must be a valid u64"))?,
        })
    }
}
