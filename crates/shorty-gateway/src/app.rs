use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, get_url_handler, health_handler, index_handler, list_page_handler,
    list_urls_handler, redirect_handler, shorten_form_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler).post(shorten_form_handler))
            .route("/list", get(list_page_handler))
            .route("/health", get(health_handler))
            .nest(
                "/v1/urls",
                Router::new()
                    .route("/", get(list_urls_handler).post(create_url_handler))
                    .route("/{short_code}", get(get_url_handler)),
            )
            .route("/{short_code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
