use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::{Html, IntoResponse},
};

use tracing::info;

use crate::api::APIResponse;
use crate::error::{HandlerError, LibraryError};
use crate::library::MediaLibrary;
use crate::model::MediaFile;
use crate::page;

#[derive(Clone)]
pub struct AppState {
    pub library: Arc<MediaLibrary>,
}

impl AppState {
    pub fn new(library: MediaLibrary) -> Self {
        AppState {
            library: Arc::new(library),
        }
    }

    async fn scan(&self) -> Result<Vec<MediaFile>, LibraryError> {
        let library = self.library.clone();
        tokio::task::spawn_blocking(move || library.scan())
            .await
            .map_err(LibraryError::ScanAborted)?
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(APIResponse::new(Some("ok"), None))
}

pub async fn serve_index(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let files = state.scan().await?;
    info!(count = files.len(), "rendering gallery");
    Ok(Html(page::render_gallery(&files, None)))
}

pub async fn serve_preview(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, HandlerError> {
    let library = state.library.clone();
    let lookup = name.clone();
    let found = tokio::task::spawn_blocking(move || library.find(&lookup))
        .await
        .map_err(LibraryError::ScanAborted)??;
    if found.is_none() {
        return Err(HandlerError::NotFound(name));
    }

    let files = state.scan().await?;
    info!(name = %name, "rendering gallery with overlay");
    Ok(Html(page::render_gallery(&files, Some(&name))))
}

pub async fn list_media(State(state): State<AppState>) -> Result<Json<APIResponse>, HandlerError> {
    let files = state.scan().await?;
    info!(count = files.len(), "listed media");
    Ok(Json(APIResponse::new(Some("ok"), Some(files))))
}
