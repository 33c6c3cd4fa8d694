//! Lightbox Module
//!
//! Click-to-enlarge behavior for a gallery of images and videos. A click on a
//! thumbnail inside the gallery container appends a full-screen overlay to the
//! document body holding an enlarged copy of the media; a click anywhere on the
//! overlay removes it again.
//!
//! # Architecture
//!
//! - [`dom`] is a small arena-backed element tree with click dispatch and HTML
//!   serialization
//! - [`GalleryClickHandler`] is attached once to the gallery container and
//!   reacts to clicks bubbling up from its children
//! - Overlays are independent: nothing counts or limits them, each one carries
//!   its own dismissal listener
//!
//! The embedded `lightbox.js` asset does the same thing in the browser.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gallery::lightbox::{GalleryClickHandler, dom::Document};
//!
//! let mut doc = Document::new();
//! // ... build a `.gallery` element with thumbnails ...
//! GalleryClickHandler::attach(&mut doc)?;
//! let outcome = doc.click(thumbnail);
//! ```

pub mod dom;
mod handler;

pub use handler::{ClickOutcome, GalleryClickHandler};

/// Class of the container the handler attaches to.
pub const GALLERY_CLASS: &str = "gallery";

/// Class given to every overlay; the stylesheet makes it cover the viewport.
pub const OVERLAY_CLASS: &str = "overlay";
