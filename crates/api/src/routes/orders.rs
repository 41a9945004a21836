//! Order ingress route: the front door of the notification pipeline.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use ruchi_common::error::AppError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/orders", post(enqueue_order))
}

/// Parse an inbound request body as JSON, substituting an empty object for
/// malformed input. Deliberately lenient: the front door accepts whatever
/// it is given and lets the worker's per-record handling sort it out.
pub fn parse_lenient(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| json!({}))
}

/// POST /orders — accept one order payload and enqueue it for asynchronous
/// processing.
///
/// The parsed body is forwarded to the queue verbatim (no schema enforced
/// at write time). Success returns the transport-assigned message id;
/// any downstream failure becomes a structured error response via
/// [`AppError`], never an unhandled fault.
async fn enqueue_order(
    State(mut state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = parse_lenient(&body);
    tracing::info!(payload = %payload, "Received order payload");

    let message_id = state.queue.enqueue(&payload.to_string()).await?;
    tracing::info!(%message_id, "Order enqueued");

    Ok(Json(json!({
        "status": "success",
        "messageId": message_id
    })))
}
