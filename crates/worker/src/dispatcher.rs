//! Notification dispatcher: renders the invoice and fans one order out
//! over the chat, email and SMS channels.
//!
//! The sequence is fixed and sequential, never parallel:
//! 1. Render the invoice. A render failure is fatal to the order — the PDF
//!    feeds two of the three channels, so nothing is attempted.
//! 2. Chat attempt; the outcome is recorded.
//! 3. Email attempt, independent of the chat outcome, only when a sender
//!    identity is configured and the order carries a non-blank recipient.
//! 4. SMS fallback iff the chat attempt did not succeed (failed or
//!    skipped alike).
//!
//! Channel failures are logged and isolated; nothing propagates to the
//! caller and nothing is retried.

use async_trait::async_trait;

use ruchi_common::config::AppConfig;
use ruchi_common::types::Order;
use ruchi_notifier::{
    ChatChannel, EmailChannel, ResendMailer, SmsChannel, SmsGateway, WhatsAppClient,
};

/// Object-safe dispatch seam so the queue consumer can be tested with a
/// recording stub.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, mobile: Option<&str>, order: &Order);
}

pub struct Dispatcher<C, E, S> {
    chat: C,
    email: E,
    sms: S,
}

impl Dispatcher<WhatsAppClient, ResendMailer, SmsGateway> {
    /// Production dispatcher with the reqwest-backed channel clients.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            WhatsAppClient::new(config),
            ResendMailer::new(config),
            SmsGateway::new(config),
        )
    }
}

impl<C, E, S> Dispatcher<C, E, S>
where
    C: ChatChannel,
    E: EmailChannel,
    S: SmsChannel,
{
    pub fn new(chat: C, email: E, sms: S) -> Self {
        Self { chat, email, sms }
    }

    pub async fn dispatch(&self, mobile: Option<&str>, order: &Order) {
        let invoice = match ruchi_invoice::render(order) {
            Ok(invoice) => invoice,
            Err(err) => {
                tracing::error!(
                    order_id = %order.id,
                    error = %err,
                    "Invoice rendering failed, skipping all channels for this order"
                );
                return;
            }
        };

        let chat_outcome = self.chat.send_confirmation(mobile, order).await;

        match order.recipient_email() {
            Some(recipient) if self.email.is_configured() => {
                if let Err(err) = self.email.send_invoice(recipient, order, &invoice).await {
                    tracing::warn!(order_id = %order.id, error = %err, "Email error");
                }
            }
            Some(_) => {
                tracing::info!(order_id = %order.id, "Skipping email: sender identity not configured");
            }
            None => {
                tracing::info!(order_id = %order.id, "Skipping email: no recipient address");
            }
        }

        if !chat_outcome.is_sent() {
            self.sms.send_fallback(mobile, order).await;
        }
    }
}

#[async_trait]
impl<C, E, S> Dispatch for Dispatcher<C, E, S>
where
    C: ChatChannel,
    E: EmailChannel,
    S: SmsChannel,
{
    async fn dispatch(&self, mobile: Option<&str>, order: &Order) {
        Dispatcher::dispatch(self, mobile, order).await;
    }
}
