mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get_service, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::AppState;

pub use handlers::{ask, not_found};
pub use models::{AskRequest, AskResponse, ErrorResponse};

pub fn router(state: Arc<AppState>) -> Router {
    // Unmatched GETs fall through to the entry page with its normal 200;
    // any other method on an unmatched route is a JSON 404.
    let spa: MethodRouter = get_service(
        ServeDir::new(&state.public_dir).fallback(ServeFile::new(&state.spa_entry)),
    )
    .fallback(not_found);

    Router::new()
        .route("/ask", post(ask).fallback_service(spa.clone()))
        .fallback_service(spa)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
