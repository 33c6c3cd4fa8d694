use crate::error::LightboxError;
use crate::model::MediaKind;

use super::dom::{Document, Listener, NodeId, Tag};
use super::{GALLERY_CLASS, OVERLAY_CLASS};

/// What a dispatched click did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Opened(NodeId),
    Dismissed(NodeId),
}

/// The click listener living on a gallery container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryClickHandler {
    container: NodeId,
}

impl GalleryClickHandler {
    /// Attaches to the first `.gallery` element of the document.
    pub fn attach(doc: &mut Document) -> Result<Self, LightboxError> {
        let container = doc
            .query_class(GALLERY_CLASS)
            .ok_or(LightboxError::GalleryNotFound(GALLERY_CLASS))?;
        Ok(Self::attach_to(doc, container))
    }

    pub fn attach_to(doc: &mut Document, container: NodeId) -> Self {
        doc.add_listener(container, Listener::Lightbox);
        tracing::debug!(?container, "lightbox attached");
        GalleryClickHandler { container }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Opens an overlay for `target` when it is an image or a video and returns
    /// it. Any other target leaves the document untouched.
    pub fn handle_click(&self, doc: &mut Document, target: NodeId) -> Option<NodeId> {
        let kind = doc.tag(target).and_then(MediaKind::from_tag)?;
        let src = doc.attribute(target, "src").unwrap_or("").to_string();

        let overlay = doc.create_element(Tag::Div);
        doc.set_class(overlay, OVERLAY_CLASS);
        let media = kind.enlarged(doc, &src);
        doc.append_child(overlay, media);
        doc.append_child(doc.body(), overlay);
        doc.add_listener(overlay, Listener::Dismiss);

        tracing::debug!(?kind, src = %src, ?overlay, "overlay opened");
        Some(overlay)
    }
}

impl Document {
    /// Dispatches a click at `target`, bubbling from the target up through its
    /// ancestors. The path is fixed before any listener runs.
    pub fn click(&mut self, target: NodeId) -> ClickOutcome {
        let mut outcome = ClickOutcome::Ignored;
        for current in self.ancestry(target) {
            let listeners = self.listeners(current).to_vec();
            for listener in listeners {
                match listener {
                    Listener::Lightbox => {
                        let handler = GalleryClickHandler { container: current };
                        if let Some(overlay) = handler.handle_click(self, target) {
                            outcome = ClickOutcome::Opened(overlay);
                        }
                    }
                    Listener::Dismiss => {
                        self.remove(current);
                        tracing::debug!(overlay = ?current, "overlay dismissed");
                        outcome = ClickOutcome::Dismissed(current);
                    }
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery_with(doc: &mut Document, tag: Tag, src: Option<&str>) -> (NodeId, NodeId) {
        let gallery = doc.create_element(Tag::Div);
        doc.set_class(gallery, GALLERY_CLASS);
        doc.append_child(doc.body(), gallery);
        let item = doc.create_element(tag);
        if let Some(src) = src {
            doc.set_attribute(item, "src", src);
        }
        doc.append_child(gallery, item);
        (gallery, item)
    }

    fn overlays(doc: &Document) -> Vec<NodeId> {
        doc.elements_by_class(OVERLAY_CLASS)
    }

    #[test]
    fn image_click_appends_one_overlay_to_body() {
        let mut doc = Document::new();
        let (gallery, img) = gallery_with(&mut doc, Tag::Img, Some("a.jpg"));
        GalleryClickHandler::attach(&mut doc).unwrap();

        let ClickOutcome::Opened(overlay) = doc.click(img) else {
            panic!("expected an overlay");
        };

        assert_eq!(overlays(&doc), vec![overlay]);
        assert_eq!(doc.parent(overlay), Some(doc.body()));
        assert_eq!(doc.children(doc.body()).last(), Some(&overlay));
        assert_eq!(doc.children(gallery), &[img]);
        assert_eq!(doc.outer_html(overlay), r#"<div class="overlay"><img src="a.jpg"></div>"#);
    }

    #[test]
    fn video_click_enables_controls_and_autoplay() {
        let mut doc = Document::new();
        let (_, video) = gallery_with(&mut doc, Tag::Video, Some("b.mp4"));
        GalleryClickHandler::attach(&mut doc).unwrap();

        let ClickOutcome::Opened(overlay) = doc.click(video) else {
            panic!("expected an overlay");
        };

        assert_eq!(overlays(&doc).len(), 1);
        let enlarged = doc.children(overlay)[0];
        assert_eq!(doc.tag(enlarged), Some(&Tag::Video));
        assert!(doc.has_attribute(enlarged, "controls"));
        assert!(doc.has_attribute(enlarged, "autoplay"));
        assert_eq!(
            doc.outer_html(overlay),
            r#"<div class="overlay"><video src="b.mp4" controls autoplay></video></div>"#
        );
    }

    #[test]
    fn non_media_click_changes_nothing() {
        let mut doc = Document::new();
        let (gallery, caption) = gallery_with(&mut doc, Tag::parse("p"), None);
        GalleryClickHandler::attach(&mut doc).unwrap();
        let before = doc.outer_html(doc.root());

        assert_eq!(doc.click(caption), ClickOutcome::Ignored);
        assert_eq!(doc.click(gallery), ClickOutcome::Ignored);
        assert_eq!(doc.outer_html(doc.root()), before);
    }

    #[test]
    fn overlay_click_restores_prior_document() {
        let mut doc = Document::new();
        let (_, img) = gallery_with(&mut doc, Tag::Img, Some("a.jpg"));
        GalleryClickHandler::attach(&mut doc).unwrap();
        let before = doc.outer_html(doc.root());

        let ClickOutcome::Opened(overlay) = doc.click(img) else {
            panic!("expected an overlay");
        };
        assert_eq!(doc.click(overlay), ClickOutcome::Dismissed(overlay));
        assert!(!doc.is_attached(overlay));
        assert!(overlays(&doc).is_empty());
        assert_eq!(doc.outer_html(doc.root()), before);
    }

    #[test]
    fn click_on_enlarged_media_bubbles_to_dismissal() {
        let mut doc = Document::new();
        let (_, video) = gallery_with(&mut doc, Tag::Video, Some("b.mp4"));
        GalleryClickHandler::attach(&mut doc).unwrap();

        let ClickOutcome::Opened(overlay) = doc.click(video) else {
            panic!("expected an overlay");
        };
        let enlarged = doc.children(overlay)[0];
        assert_eq!(doc.click(enlarged), ClickOutcome::Dismissed(overlay));
        assert!(overlays(&doc).is_empty());
    }

    #[test]
    fn missing_source_yields_empty_src() {
        let mut doc = Document::new();
        let (_, img) = gallery_with(&mut doc, Tag::Img, None);
        let handler = GalleryClickHandler::attach(&mut doc).unwrap();

        let overlay = handler.handle_click(&mut doc, img).unwrap();
        assert_eq!(doc.outer_html(overlay), r#"<div class="overlay"><img src=""></div>"#);
    }

    #[test]
    fn repeated_clicks_stack_independent_overlays() {
        let mut doc = Document::new();
        let (_, img) = gallery_with(&mut doc, Tag::Img, Some("a.jpg"));
        GalleryClickHandler::attach(&mut doc).unwrap();

        let ClickOutcome::Opened(first) = doc.click(img) else {
            panic!("expected an overlay");
        };
        let ClickOutcome::Opened(second) = doc.click(img) else {
            panic!("expected an overlay");
        };
        assert_eq!(overlays(&doc), vec![first, second]);

        doc.click(second);
        assert_eq!(overlays(&doc), vec![first]);
    }

    #[test]
    fn dismissed_overlays_keep_arena_slots() {
        let mut doc = Document::new();
        let (_, img) = gallery_with(&mut doc, Tag::Img, Some("a.jpg"));
        GalleryClickHandler::attach(&mut doc).unwrap();
        let before = doc.node_count();

        for _ in 0..3 {
            let ClickOutcome::Opened(overlay) = doc.click(img) else {
                panic!("expected an overlay");
            };
            doc.click(overlay);
        }
        assert!(overlays(&doc).is_empty());
        assert_eq!(doc.node_count(), before + 6);
    }

    #[test]
    fn attach_fails_without_gallery() {
        let mut doc = Document::new();
        let err = GalleryClickHandler::attach(&mut doc).unwrap_err();
        assert!(matches!(err, LightboxError::GalleryNotFound("gallery")));
    }

    #[test]
    fn attach_to_uses_given_container() {
        let mut doc = Document::new();
        let grid = doc.create_element(Tag::Div);
        let img = doc.create_element(Tag::Img);
        doc.set_attribute(img, "src", "c.gif");
        doc.append_child(grid, img);
        doc.append_child(doc.body(), grid);

        let handler = GalleryClickHandler::attach_to(&mut doc, grid);
        assert_eq!(handler.container(), grid);
        assert!(matches!(doc.click(img), ClickOutcome::Opened(_)));
    }

    #[test]
    fn clicks_outside_gallery_are_ignored() {
        let mut doc = Document::new();
        gallery_with(&mut doc, Tag::Img, Some("a.jpg"));
        GalleryClickHandler::attach(&mut doc).unwrap();
        let stray = doc.create_element(Tag::Img);
        doc.append_child(doc.body(), stray);

        assert_eq!(doc.click(stray), ClickOutcome::Ignored);
        assert!(overlays(&doc).is_empty());
    }
}
