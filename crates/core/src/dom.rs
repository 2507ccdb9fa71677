//! In-memory document tree.
//!
//! The widget manipulates its host page through this arena: nodes are
//! addressed by [`NodeId`] and owned by a [`Document`], so views can keep
//! plain copyable handles to the elements they manage instead of borrowing
//! into the tree. Elements carry the pieces of the host contract the deck
//! consumes: an ordered class list, an insertion-ordered inline style map,
//! and an attribute map. Text and comment nodes exist so that page discovery
//! can skip them, as a real container's child list would require.

use fxhash::FxHashMap;
use indexmap::IndexMap;

/// Handle to a node inside a [`Document`].
///
/// Ids are only meaningful for the document that created them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    classes: Vec<String>,
    styles: IndexMap<String, String>,
    attributes: FxHashMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Node {
        Node {
            kind,
            classes: Vec::new(),
            styles: IndexMap::new(),
            attributes: FxHashMap::default(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Arena of nodes standing in for the host page.
///
/// A fresh document owns a single `body` element; everything else is created
/// through [`create_element`](Self::create_element) and friends and wired up
/// with [`append_child`](Self::append_child). The document also exposes the
/// host page's URL fragment identifier, which the deck consults for its
/// starting page.
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    fragment: Option<String>,
}

impl Document {
    pub fn new() -> Document {
        let body = Node::new(NodeKind::Element {
            tag: "body".to_string(),
        });

        Document {
            nodes: vec![body],
            body: NodeId(0),
            fragment: None,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The URL fragment identifier of the host page, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_fragment<S: Into<String>>(&mut self, fragment: S) {
        self.fragment = Some(fragment.into());
    }

    pub fn create_element<S: Into<String>>(&mut self, tag: S) -> NodeId {
        self.push(Node::new(NodeKind::Element { tag: tag.into() }))
    }

    pub fn create_text<S: Into<String>>(&mut self, text: S) -> NodeId {
        self.push(Node::new(NodeKind::Text(text.into())))
    }

    pub fn create_comment<S: Into<String>>(&mut self, text: S) -> NodeId {
        self.push(Node::new(NodeKind::Comment(text.into())))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` to `parent`'s child list.
    ///
    /// A node appended twice is first detached from its previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|&id| id != child);
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.nodes[id.0].kind {
            NodeKind::Element { ref tag } => Some(tag),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes[id.0].kind {
            NodeKind::Text(ref text) => Some(text),
            _ => None,
        }
    }

    /// Direct element children of `id`, in tree order, skipping text and
    /// comment nodes.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    pub fn add_class(&mut self, id: NodeId, name: &str) {
        let classes = &mut self.nodes[id.0].classes;
        if !classes.iter().any(|class| class == name) {
            classes.push(name.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].classes.retain(|class| class != name);
    }

    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|class| class == name)
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.nodes[id.0].classes.join(" ")
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        self.nodes[id.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes[id.0].styles.get(property).map(String::as_str)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].attributes.remove(name);
    }
}

impl Default for Document {
    fn default() -> Document {
        Document::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_children_skip_text_and_comments() {
        let mut doc = Document::new();
        let container = doc.create_element("div");

        let text = doc.create_text("stray whitespace");
        let first = doc.create_element("section");
        let comment = doc.create_comment("markup note");
        let second = doc.create_element("section");

        for child in [text, first, comment, second] {
            doc.append_child(container, child);
        }

        assert_eq!(doc.children(container).len(), 4);
        assert_eq!(doc.element_children(container), vec![first, second]);
    }

    #[test]
    fn classes_are_ordered_and_deduplicated() {
        let mut doc = Document::new();
        let node = doc.create_element("div");

        doc.add_class(node, "pagedeck-page");
        doc.add_class(node, "hero");
        doc.add_class(node, "pagedeck-page");

        assert_eq!(doc.class_name(node), "pagedeck-page hero");
        assert!(doc.has_class(node, "hero"));

        doc.remove_class(node, "hero");
        assert!(!doc.has_class(node, "hero"));
        assert_eq!(doc.class_name(node), "pagedeck-page");
    }

    #[test]
    fn styles_keep_declaration_order() {
        let mut doc = Document::new();
        let node = doc.create_element("div");

        doc.set_style(node, "top", "0%");
        doc.set_style(node, "transition-duration", "800ms");
        doc.set_style(node, "top", "100%");

        assert_eq!(doc.style(node, "top"), Some("100%"));
        assert_eq!(doc.style(node, "transition-duration"), Some("800ms"));
    }

    #[test]
    fn attributes_round_trip() {
        let mut doc = Document::new();
        let node = doc.create_element("section");

        assert_eq!(doc.attribute(node, "title"), None);
        doc.set_attribute(node, "title", "Introduction");
        assert_eq!(doc.attribute(node, "title"), Some("Introduction"));
        doc.remove_attribute(node, "title");
        assert_eq!(doc.attribute(node, "title"), None);
    }

    #[test]
    fn append_child_reparents() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("span");

        doc.append_child(first, child);
        doc.append_child(second, child);

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[child]);
        assert_eq!(doc.parent(child), Some(second));
    }
}
