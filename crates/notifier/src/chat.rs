//! Primary chat channel: WhatsApp Cloud API template message.

use async_trait::async_trait;
use serde_json::json;

use ruchi_common::config::AppConfig;
use ruchi_common::types::Order;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v17.0";
const TEMPLATE_NAME: &str = "order_confirmation";

/// Result of one chat delivery attempt.
///
/// `Skipped` (missing credentials or recipient) is deliberately distinct
/// from `Failed` in the logs, but both count as non-success and trigger
/// the SMS fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    Sent,
    Failed,
    Skipped,
}

impl ChatOutcome {
    pub fn is_sent(self) -> bool {
        matches!(self, ChatOutcome::Sent)
    }
}

/// Templated chat delivery. Implementations never raise: every failure
/// mode collapses into a [`ChatOutcome`].
#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn send_confirmation(&self, mobile: Option<&str>, order: &Order) -> ChatOutcome;
}

/// WhatsApp Cloud API client (Meta graph API, bearer token per sender
/// phone-number id).
pub struct WhatsAppClient {
    http: reqwest::Client,
    token: Option<String>,
    phone_id: Option<String>,
}

impl WhatsAppClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: config.meta_token.clone(),
            phone_id: config.meta_phone_id.clone(),
        }
    }

    /// Template body parameters, in template order: customer name,
    /// order id, final amount.
    fn template_params(order: &Order) -> serde_json::Value {
        json!([
            { "type": "text", "text": order.customer_name },
            { "type": "text", "text": order.id },
            { "type": "text", "text": order.display_total().to_string() },
        ])
    }
}

#[async_trait]
impl ChatChannel for WhatsAppClient {
    async fn send_confirmation(&self, mobile: Option<&str>, order: &Order) -> ChatOutcome {
        let (Some(token), Some(phone_id)) = (&self.token, &self.phone_id) else {
            tracing::info!(order_id = %order.id, "Skipping WhatsApp: missing credentials");
            return ChatOutcome::Skipped;
        };
        let Some(mobile) = mobile else {
            tracing::info!(order_id = %order.id, "Skipping WhatsApp: no recipient mobile");
            return ChatOutcome::Skipped;
        };

        let payload = json!({
            "messaging_product": "whatsapp",
            "to": mobile,
            "type": "template",
            "template": {
                "name": TEMPLATE_NAME,
                "language": { "code": "en_US" },
                "components": [
                    { "type": "body", "parameters": Self::template_params(order) }
                ]
            }
        });

        let url = format!("{GRAPH_API_BASE}/{phone_id}/messages");
        match self.http.post(&url).bearer_auth(token).json(&payload).send().await {
            Ok(res) if res.status().is_success() => {
                tracing::info!(order_id = %order.id, "WhatsApp sent");
                ChatOutcome::Sent
            }
            Ok(res) => {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                tracing::warn!(order_id = %order.id, %status, body, "WhatsApp failed");
                ChatOutcome::Failed
            }
            Err(err) => {
                tracing::warn!(order_id = %order.id, error = %err, "WhatsApp error");
                ChatOutcome::Failed
            }
        }
    }
}
