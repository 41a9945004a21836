pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the complete ingress router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .with_state(state)
}
