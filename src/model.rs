use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lightbox::dom::{Document, NodeId, Tag};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// The two kinds of media a gallery can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `None` for anything that is not an `img` or `video` element.
    pub fn from_tag(tag: &Tag) -> Option<Self> {
        match tag {
            Tag::Img => Some(MediaKind::Image),
            Tag::Video => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            MediaKind::Image => Tag::Img,
            MediaKind::Video => Tag::Video,
        }
    }

    /// Builds the detached element shown inside an overlay.
    pub fn enlarged(self, doc: &mut Document, src: &str) -> NodeId {
        let node = doc.create_element(self.tag());
        doc.set_attribute(node, "src", src);
        if self == MediaKind::Video {
            doc.set_flag(node, "controls");
            doc.set_flag(node, "autoplay");
        }
        node
    }

    /// Builds the detached element shown inside the gallery grid.
    pub fn thumbnail(self, doc: &mut Document, src: &str, alt: &str) -> NodeId {
        let node = doc.create_element(self.tag());
        doc.set_attribute(node, "src", src);
        match self {
            MediaKind::Image => {
                doc.set_attribute(node, "alt", alt);
                doc.set_attribute(node, "loading", "lazy");
            }
            MediaKind::Video => {
                doc.set_flag(node, "muted");
                doc.set_attribute(node, "preload", "metadata");
            }
        }
        node
    }
}

/// A supported file found in the media folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub name: String,
    pub kind: MediaKind,
    pub created: DateTime<Utc>,
    pub url: String,
}

impl MediaFile {
    pub fn new(name: &str, kind: MediaKind, created: DateTime<Utc>) -> Self {
        MediaFile {
            name: name.to_string(),
            kind,
            created,
            url: media_url(name),
        }
    }
}

pub fn media_url(name: &str) -> String {
    format!("{}/{}", crate::MEDIA_ROUTE, urlencoding::encode(name))
}
