//! SMS fallback channel: 2Factor one-time-code API.
//!
//! The provider's OTP endpoint is used as a plain SMS send with the order
//! id in the code position — an integration shortcut inherited from the
//! upstream provider setup, kept for wire compatibility.

use async_trait::async_trait;

use ruchi_common::config::AppConfig;
use ruchi_common::types::Order;

const SMS_API_BASE: &str = "https://2factor.in/API/V1";

/// Best-effort SMS delivery. Fire-and-forget: the response body is not
/// inspected and no outcome is reported to the caller.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    async fn send_fallback(&self, mobile: Option<&str>, order: &Order);
}

pub struct SmsGateway {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl SmsGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.sms_api_key.clone(),
        }
    }
}

#[async_trait]
impl SmsChannel for SmsGateway {
    async fn send_fallback(&self, mobile: Option<&str>, order: &Order) {
        let Some(api_key) = &self.api_key else {
            tracing::info!(order_id = %order.id, "Skipping SMS: missing SMS_API_KEY");
            return;
        };
        let Some(mobile) = mobile else {
            tracing::info!(order_id = %order.id, "Skipping SMS: no recipient mobile");
            return;
        };

        let url = format!("{SMS_API_BASE}/{api_key}/SMS/{mobile}/{}/AUTOGEN", order.id);
        match self.http.get(&url).send().await {
            Ok(_) => tracing::info!(order_id = %order.id, "SMS sent"),
            Err(err) => tracing::warn!(order_id = %order.id, error = %err, "SMS error"),
        }
    }
}
