use std::error::Error;

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod library;
pub mod lightbox;
pub mod model;
pub mod page;
pub mod routes;

/// Where the media folder is mounted.
pub const MEDIA_ROUTE: &str = "/static/images";

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
