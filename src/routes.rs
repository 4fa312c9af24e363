use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::Transport;
use crate::handlers;
use crate::models::AppState;

pub fn build_router<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(handlers::index_get::<T>))
        .route("/submit", post(handlers::submit_post::<T>))
        .route("/refresh", post(handlers::refresh_post::<T>))
        .route("/static/styles.css", get(handlers::stylesheet_get))
        // Pages may carry form state; keep them out of caches.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}
