//! Outbound notification channels for order confirmations.
//!
//! Each channel is a trait with a reqwest-backed production client, so the
//! dispatcher can be exercised with mock channels in tests. Channel
//! credentials come from [`ruchi_common::config::AppConfig`]; a missing
//! credential disables the channel rather than erroring.

pub mod chat;
pub mod email;
pub mod sms;

pub use chat::{ChatChannel, ChatOutcome, WhatsAppClient};
pub use email::{ChannelError, EmailChannel, ResendMailer, email_body};
pub use sms::{SmsChannel, SmsGateway};
