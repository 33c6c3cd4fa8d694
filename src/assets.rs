use axum::{
    body::Body,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Stylesheet and browser-side lightbox script, compiled into the binary.
#[derive(Embed)]
#[folder = "web"]
pub struct Assets;

pub async fn serve_embedded(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        None => {
            tracing::info!(path, "asset not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
