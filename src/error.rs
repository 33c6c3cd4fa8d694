use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::APIResponse;

#[derive(Debug, Error)]
pub enum LightboxError {
    #[error("GalleryNotFound: no element with class '{0}'")]
    GalleryNotFound(&'static str),
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Io: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ScanAborted")]
    ScanAborted(#[source] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("LibraryError: {}", crate::unpack_error(.0))]
    LibraryError(#[from] LibraryError),
    #[error("NotFound: {0}")]
    NotFound(String),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::LibraryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message sent to clients. Server errors stay generic; the full chain
    /// only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            HandlerError::LibraryError(_) => "failed to list media".to_string(),
            HandlerError::NotFound(_) => self.to_string(),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::info!(error = %self, "request rejected");
        }
        (status, Json(APIResponse::new_from_msg(&self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn library_error_display_includes_source_chain() {
        let err = HandlerError::from(LibraryError::Io {
            path: PathBuf::from("static/images"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(err.to_string(), "LibraryError: Io: static/images: missing");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "failed to list media");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = HandlerError::NotFound("x.jpg".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "NotFound: x.jpg");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
