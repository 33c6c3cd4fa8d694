use std::fmt::Write;

/// Handle to a node owned by a [`Document`].
///
/// Ids are only minted by the document that owns the node and stay valid for the
/// document's lifetime; removing a node detaches it but keeps its slot. Slots are
/// never reused, so a long-lived document grows with every overlay opened (two
/// nodes per click) even after the overlay is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Html,
    Head,
    Body,
    Div,
    Img,
    Video,
    Other(String),
}

impl Tag {
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "body" => Tag::Body,
            "div" => Tag::Div,
            "img" => Tag::Img,
            "video" => Tag::Video,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::Img => "img",
            Tag::Video => "video",
            Tag::Other(name) => name.as_str(),
        }
    }

    fn is_void(&self) -> bool {
        match self {
            Tag::Img => true,
            Tag::Other(name) => matches!(name.as_str(), "meta" | "link" | "br" | "hr" | "input" | "source"),
            _ => false,
        }
    }
}

/// Click listeners an element can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Opens an overlay for the clicked media item.
    Lightbox,
    /// Removes the element it is attached to.
    Dismiss,
}

#[derive(Debug, Clone)]
struct Attribute {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone)]
struct Element {
    tag: Tag,
    class: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
}

/// Arena-backed element tree with an `html > head + body` skeleton.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Slot>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        doc.root = doc.create_element(Tag::Html);
        doc.head = doc.create_element(Tag::Head);
        doc.body = doc.create_element(Tag::Body);
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    /// Number of slots ever allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.push(Node::Element(Element {
            tag,
            class: None,
            attributes: Vec::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::Text(text.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Slot { node, parent: None });
        id
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Returns `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|el| &el.tag)
    }

    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.class.as_deref()
    }

    pub fn set_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.class = Some(class.to_string());
        }
    }

    /// Sets `name="value"`, replacing an existing value in place.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.put_attribute(id, name, Some(value.to_string()));
    }

    /// Sets a boolean attribute such as `controls`.
    pub fn set_flag(&mut self, id: NodeId, name: &str) {
        self.put_attribute(id, name, None);
    }

    fn put_attribute(&mut self, id: NodeId, name: &str, value: Option<String>) {
        if name.eq_ignore_ascii_case("class") {
            self.set_class(id, value.as_deref().unwrap_or(""));
            return;
        }
        let Some(el) = self.element_mut(id) else {
            return;
        };
        match el.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => el.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Boolean attributes read back as `Some("")`.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("class") {
            return self.class(id);
        }
        self.element(id)?
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Text nodes cannot take children and a node cannot
    /// be appended inside its own subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.element(parent).is_none() || self.nodes.get(child.0).is_none() {
            return;
        }
        if self.ancestry(parent).contains(&child) {
            return;
        }
        self.remove(child);
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detaches `id` from its parent. The subtree stays intact and can be
    /// re-appended.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(el) = self.element_mut(parent) {
            el.children.retain(|c| *c != id);
        }
        self.nodes[id.0].parent = None;
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestry(id).last() == Some(&self.root)
    }

    /// `id` followed by each ancestor up to the topmost one.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(id.0).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// First attached element carrying `class`, in document order.
    pub fn query_class(&self, class: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.class(id).is_some_and(|c| c.split_whitespace().any(|c| c == class)) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        None
    }

    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.class(id).is_some_and(|c| c.split_whitespace().any(|c| c == class)) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        found
    }

    pub fn add_listener(&mut self, id: NodeId, listener: Listener) {
        if let Some(el) = self.element_mut(id) {
            el.listeners.push(listener);
        }
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] {
        self.element(id).map(|el| el.listeners.as_slice()).unwrap_or(&[])
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(slot) = self.nodes.get(id.0) else {
            return;
        };
        let el = match &slot.node {
            Node::Text(text) => {
                escape_into(text, out);
                return;
            }
            Node::Element(el) => el,
        };

        let _ = write!(out, "<{}", el.tag.name());
        if let Some(class) = &el.class {
            out.push_str(" class=\"");
            escape_into(class, out);
            out.push('"');
        }
        for attr in &el.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push_str("=\"");
                escape_into(value, out);
                out.push('"');
            }
        }
        out.push('>');

        if el.tag.is_void() {
            return;
        }
        for child in &el.children {
            self.write_node(*child, out);
        }
        let _ = write!(out, "</{}>", el.tag.name());
    }
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
