use crate::lightbox::dom::{Document, NodeId, Tag};
use crate::lightbox::{GALLERY_CLASS, GalleryClickHandler};
use crate::model::MediaFile;

pub const TITLE: &str = "Gallery";
pub const STYLESHEET: &str = "/assets/gallery.css";
pub const SCRIPT: &str = "/assets/lightbox.js";

/// Renders the gallery page. With `open` set to a file name, the lightbox is
/// run against the built page so it is served with that overlay visible.
pub fn render_gallery(files: &[MediaFile], open: Option<&str>) -> String {
    let mut doc = Document::new();
    build_head(&mut doc);

    let gallery = doc.create_element(Tag::Div);
    doc.set_class(gallery, GALLERY_CLASS);
    doc.append_child(doc.body(), gallery);

    let mut selected = None;
    for file in files {
        let thumb = file.kind.thumbnail(&mut doc, &file.url, &file.name);
        doc.append_child(gallery, thumb);
        if open == Some(file.name.as_str()) {
            selected = Some(thumb);
        }
    }

    if files.is_empty() {
        let body = doc.body();
        let empty = element(&mut doc, "p", body);
        doc.set_class(empty, "empty");
        let text = doc.create_text("No media yet.");
        doc.append_child(empty, text);
    }

    if let Some(thumb) = selected {
        GalleryClickHandler::attach_to(&mut doc, gallery);
        doc.click(thumb);
    }

    format!("<!doctype html>{}", doc.outer_html(doc.root()))
}

fn build_head(doc: &mut Document) {
    let head = doc.head();

    let charset = element(doc, "meta", head);
    doc.set_attribute(charset, "charset", "utf-8");

    let viewport = element(doc, "meta", head);
    doc.set_attribute(viewport, "name", "viewport");
    doc.set_attribute(viewport, "content", "width=device-width, initial-scale=1");

    let title = element(doc, "title", head);
    let text = doc.create_text(TITLE);
    doc.append_child(title, text);

    let style = element(doc, "link", head);
    doc.set_attribute(style, "rel", "stylesheet");
    doc.set_attribute(style, "href", STYLESHEET);

    let script = element(doc, "script", head);
    doc.set_attribute(script, "src", SCRIPT);
    doc.set_flag(script, "defer");
}

fn element(doc: &mut Document, tag: &str, parent: NodeId) -> NodeId {
    let node = doc.create_element(Tag::parse(tag));
    doc.append_child(parent, node);
    node
}
