//! Shared application state for the Axum ingress server.

use ruchi_common::config::AppConfig;
use ruchi_common::queue::OrderQueue;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub queue: OrderQueue,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(queue: OrderQueue, config: AppConfig) -> Self {
        Self { queue, config }
    }
}
