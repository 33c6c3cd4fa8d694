use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::MEDIA_ROUTE;
use crate::assets::serve_embedded;
use crate::handler::{self, AppState};

pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let media = ServeDir::new(state.library.root());

    Router::new()
        .route("/", get(handler::serve_index))
        .route("/view/:name", get(handler::serve_preview))
        .route("/media", get(handler::list_media))
        .route("/healthcheck", get(handler::healthcheck))
        .route("/assets/*path", get(serve_embedded))
        .nest_service(MEDIA_ROUTE, media)
        .layer(cors)
        .with_state(state)
}
