//! Server-side page document.
//!
//! An arena of elements standing in for the browser DOM. Every visual
//! mutation that actually changes a value is appended to a patch journal, which
//! the browser replays after each click.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;

/// Index of an element in its [`Document`]. Rendered as `data-node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One recorded visual change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub node: NodeId,
    #[serde(flatten)]
    pub op: PatchOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PatchOp {
    AddClass { class: String },
    RemoveClass { class: String },
    SetStyle { property: String, value: String },
    SetText { text: String },
    Move { parent: NodeId, before: Option<NodeId> },
}

/// An element id was assigned to a second element.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Element id '{id}' is already in use")]
pub struct DuplicateElementId {
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) dom_id: Option<String>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) data: BTreeMap<String, String>,
    pub(crate) style: BTreeMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) raw_html: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Element tree plus patch journal.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    ids: HashMap<String, NodeId>,
    patches: Vec<Patch>,
}

/// A document shared by the panel locator, the sidebar view and the page.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Lock a shared document. Mutations never panic midway, so a poisoned lock
/// still guards a consistent tree.
pub fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the `body` element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_string(),
                ..Default::default()
            }],
            ids: HashMap::new(),
            patches: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node from its rendered `data-node` index.
    pub fn node(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then_some(NodeId(index))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element {
            tag: tag.to_string(),
            ..Default::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent`.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        node
    }

    /// Attach `child` as the last child of `parent`, detaching it first.
    /// Structural building is not journaled.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Move `child` under `parent`, before `reference` (or last). Journaled.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if parent == child || reference == Some(child) {
            return;
        }
        let reference = reference.filter(|candidate| self.nodes[candidate.0].parent == Some(parent));
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let position = reference
            .and_then(|candidate| siblings.iter().position(|id| *id == candidate))
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
        self.patches.push(Patch {
            node: child,
            op: PatchOp::Move { parent, before: reference },
        });
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
    }

    /// Assign an element id. Ids are unique per document; taking one that
    /// another element holds is an error and leaves both elements unchanged.
    pub fn set_dom_id(&mut self, node: NodeId, id: &str) -> Result<(), DuplicateElementId> {
        if self.ids.get(id).is_some_and(|owner| *owner != node) {
            return Err(DuplicateElementId { id: id.to_string() });
        }
        if let Some(previous) = self.nodes[node.0].dom_id.replace(id.to_string()) {
            self.ids.remove(&previous);
        }
        self.ids.insert(id.to_string(), node);
        Ok(())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn dom_id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].dom_id.as_deref()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.nodes[node.0].data.insert(key.to_string(), value.to_string());
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.nodes[node.0].data.get(key).map(String::as_str)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    /// Add classes while building; not journaled.
    pub fn with_classes(&mut self, node: NodeId, classes: &[&str]) -> NodeId {
        let element = &mut self.nodes[node.0];
        element.classes.extend(classes.iter().map(|class| class.to_string()));
        node
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.nodes[node.0].classes.insert(class.to_string()) {
            self.patches.push(Patch {
                node,
                op: PatchOp::AddClass { class: class.to_string() },
            });
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if self.nodes[node.0].classes.remove(class) {
            self.patches.push(Patch {
                node,
                op: PatchOp::RemoveClass { class: class.to_string() },
            });
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let style = &mut self.nodes[node.0].style;
        if style.get(property).map(String::as_str) == Some(value) {
            return;
        }
        style.insert(property.to_string(), value.to_string());
        self.patches.push(Patch {
            node,
            op: PatchOp::SetStyle {
                property: property.to_string(),
                value: value.to_string(),
            },
        });
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if self.nodes[node.0].text.as_deref() == Some(text) {
            return;
        }
        self.nodes[node.0].text = Some(text.to_string());
        self.patches.push(Patch {
            node,
            op: PatchOp::SetText { text: text.to_string() },
        });
    }

    /// Trusted markup (inline SVG) rendered verbatim after the text.
    pub fn set_raw_html(&mut self, node: NodeId, html: &str) {
        self.nodes[node.0].raw_html = Some(html.to_string());
    }

    /// Descendants of `root` (excluding it) carrying `class`, in document order.
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.has_class(node, class) {
                found.push(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        found
    }

    /// Drain the patch journal.
    pub fn take_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }
}
