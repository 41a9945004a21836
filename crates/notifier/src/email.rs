//! Email channel: Resend transactional email with the invoice attached.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use thiserror::Error;

use ruchi_common::config::AppConfig;
use ruchi_common::types::Order;
use ruchi_invoice::RenderedInvoice;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// A channel delivery failure. Logged and isolated by the dispatcher,
/// never fatal to the order.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected request: {0}")]
    Rejected(String),
}

/// Transactional email delivery with one binary attachment.
#[async_trait]
pub trait EmailChannel: Send + Sync {
    /// Whether a verified sender identity is configured. When false the
    /// dispatcher skips the channel silently.
    fn is_configured(&self) -> bool;

    async fn send_invoice(
        &self,
        recipient: &str,
        order: &Order,
        invoice: &RenderedInvoice,
    ) -> Result<(), ChannelError>;
}

/// Resend HTTP API client. Sender must be a pre-verified identity.
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: Option<String>,
    sender: Option<String>,
}

impl ResendMailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.resend_api_key.clone(),
            sender: config.sender_email.clone(),
        }
    }
}

/// Plain-text body summarizing the order and the dish list. Absent
/// optionals read "Not specified".
pub fn email_body(order: &Order) -> String {
    let dishes_text = order
        .dishes
        .iter()
        .map(|d| format!("  - {} ({} pax)", d.name, d.pax))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Dear {customer},\n\n\
         Thank you for choosing RuchiServ Catering!\n\n\
         Your order has been confirmed with the following details:\n\n\
         Order ID: #{id}\n\
         Date: {date}\n\
         Event Time: {event_time}\n\
         Location: {location}\n\
         Meal Type: {meal_type}\n\
         Total Pax: {total_pax}\n\n\
         Dishes:\n\
         {dishes_text}\n\n\
         Total Amount: \u{20B9}{total}\n\n\
         Please find the detailed invoice attached.\n\n\
         For any queries, please contact us.\n\n\
         Best regards,\n\
         RuchiServ Team\n",
        customer = order.customer_name,
        id = order.id,
        date = order.date,
        event_time = order.event_time.as_deref().unwrap_or("Not specified"),
        location = order.location.as_deref().unwrap_or("Not specified"),
        meal_type = order.meal_type.as_deref().unwrap_or("Not specified"),
        total_pax = order
            .total_pax
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        total = order.display_total(),
    )
}

#[async_trait]
impl EmailChannel for ResendMailer {
    fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.sender.is_some()
    }

    async fn send_invoice(
        &self,
        recipient: &str,
        order: &Order,
        invoice: &RenderedInvoice,
    ) -> Result<(), ChannelError> {
        let (Some(api_key), Some(sender)) = (&self.api_key, &self.sender) else {
            return Err(ChannelError::Rejected("sender identity not configured".into()));
        };

        let payload = json!({
            "from": sender,
            "to": [recipient],
            "subject": format!("RuchiServ - Order Confirmation #{}", order.id),
            "text": email_body(order),
            "attachments": [{
                "filename": invoice.file_name,
                "content": BASE64.encode(&invoice.bytes),
            }],
        });

        let res = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if res.status().is_success() {
            tracing::info!(order_id = %order.id, recipient, "Email sent");
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ChannelError::Rejected(format!("{status}: {body}")))
        }
    }
}
