//! Sidebar markup and its [`SidebarView`] implementation.

use tracing::debug;
use tuneboard_nav::{Breadcrumb, ClickTarget, ListenerAttachError, MenuModel, SidebarView};

use crate::document::{Document, DuplicateElementId, NodeId, SharedDocument, lock};

pub const SIDEBAR_ROOT_ID: &str = "sidebar-menu";
pub const BREADCRUMB_ID: &str = "page-tag";
pub const BREADCRUMB_TITLE_ID: &str = "page-title";
pub const BREADCRUMB_SUBTITLE_ID: &str = "page-subtitle";

const ITEM_CLASS: &str = "sidebar-menu-item";
const LEAF_CLASS: &str = "leaf";
const HEADER_CLASS: &str = "group-header";
const ACTIVE: &str = "active";
const INACTIVE: &str = "inactive";
const ARROW_EXPANDED: &str = "rotate(90deg)";
const ARROW_COLLAPSED: &str = "rotate(0deg)";

pub fn group_element_id(group_id: &str) -> String {
    format!("group-{group_id}")
}

pub fn arrow_element_id(group_id: &str) -> String {
    format!("group-{group_id}-arrow")
}

pub fn submenu_element_id(group_id: &str) -> String {
    format!("{group_id}-submenu")
}

pub fn leaf_element_id(leaf_id: &str) -> String {
    format!("leaf-{leaf_id}")
}

/// Build the logo, heading and menu under `parent`; returns the menu root.
///
/// Everything starts inactive and collapsed; the engine renders the initial
/// selection once content is ready. Fails when two derived element ids
/// coincide, e.g. group `leaf` and leaf `submenu` both yield `leaf-submenu`.
pub fn build_sidebar(
    doc: &mut Document,
    parent: NodeId,
    model: &MenuModel,
    heading: &str,
    logo_svg: &str,
) -> Result<NodeId, DuplicateElementId> {
    let logo = doc.append_new(parent, "div");
    doc.with_classes(logo, &["sidebar-logo"]);
    doc.set_raw_html(logo, logo_svg);

    let header = doc.append_new(parent, "div");
    doc.with_classes(header, &["sidebar-header"]);
    doc.set_text(header, heading);

    let root = doc.append_new(parent, "div");
    doc.with_classes(root, &["sidebar-menu"]);
    doc.set_dom_id(root, SIDEBAR_ROOT_ID)?;

    for group in model.groups() {
        let group_header = doc.append_new(root, "div");
        doc.with_classes(group_header, &[ITEM_CLASS, HEADER_CLASS, INACTIVE]);
        doc.set_dom_id(group_header, &group_element_id(&group.id))?;
        doc.set_data(group_header, "group", &group.id);

        let title = doc.append_new(group_header, "span");
        doc.with_classes(title, &["group-title"]);
        doc.set_text(title, &group.title);

        let arrow = doc.append_new(group_header, "span");
        doc.with_classes(arrow, &["group-arrow"]);
        doc.set_dom_id(arrow, &arrow_element_id(&group.id))?;
        doc.set_text(arrow, "›");
        doc.set_style(arrow, "transform", ARROW_COLLAPSED);

        let submenu = doc.append_new(root, "div");
        doc.with_classes(submenu, &["submenu"]);
        doc.set_dom_id(submenu, &submenu_element_id(&group.id))?;
        doc.set_style(submenu, "display", "none");

        for leaf_id in &group.leaf_ids {
            let Ok(leaf) = model.leaf_by_id(leaf_id) else {
                continue;
            };
            let item = doc.append_new(submenu, "div");
            doc.with_classes(item, &[ITEM_CLASS, LEAF_CLASS, INACTIVE]);
            doc.set_dom_id(item, &leaf_element_id(&leaf.id))?;
            doc.set_data(item, "tab", &leaf.id);

            let label = doc.append_new(item, "span");
            doc.set_text(label, &leaf.label);
        }
    }
    Ok(root)
}

/// Build the breadcrumb block (`#page-tag`) under `parent`.
pub fn build_breadcrumb(doc: &mut Document, parent: NodeId) -> Result<NodeId, DuplicateElementId> {
    let tag = doc.append_new(parent, "div");
    doc.with_classes(tag, &["page-tag"]);
    doc.set_dom_id(tag, BREADCRUMB_ID)?;

    let title = doc.append_new(tag, "span");
    doc.with_classes(title, &["page-title"]);
    doc.set_dom_id(title, BREADCRUMB_TITLE_ID)?;

    let subtitle = doc.append_new(tag, "span");
    doc.with_classes(subtitle, &["page-subtitle"]);
    doc.set_dom_id(subtitle, BREADCRUMB_SUBTITLE_ID)?;
    Ok(tag)
}

/// [`SidebarView`] writing classes, styles and text into the page document.
#[derive(Debug)]
pub struct DocumentSidebar {
    document: SharedDocument,
    root: Option<NodeId>,
}

impl DocumentSidebar {
    pub fn new(document: SharedDocument) -> Self {
        Self { document, root: None }
    }

    fn set_active(&self, element_id: &str, active: bool) {
        let mut doc = lock(&self.document);
        let Some(node) = doc.get_element_by_id(element_id) else {
            debug!(%element_id, "Sidebar element missing; skipping highlight");
            return;
        };
        let (add, remove) = if active { (ACTIVE, INACTIVE) } else { (INACTIVE, ACTIVE) };
        doc.remove_class(node, remove);
        doc.add_class(node, add);
    }

    fn set_style_by_id(&self, element_id: &str, property: &str, value: &str) {
        let mut doc = lock(&self.document);
        if let Some(node) = doc.get_element_by_id(element_id) {
            doc.set_style(node, property, value);
        }
    }
}

impl SidebarView for DocumentSidebar {
    type Node = NodeId;

    fn attach_listener(&mut self) -> Result<(), ListenerAttachError> {
        let root = lock(&self.document)
            .get_element_by_id(SIDEBAR_ROOT_ID)
            .ok_or_else(|| ListenerAttachError::new(format!("element #{SIDEBAR_ROOT_ID} is missing")))?;
        self.root = Some(root);
        Ok(())
    }

    fn is_root(&self, node: &NodeId) -> bool {
        self.root == Some(*node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        lock(&self.document).parent(*node)
    }

    fn classify(&self, node: &NodeId) -> Option<ClickTarget> {
        let doc = lock(&self.document);
        if doc.has_class(*node, LEAF_CLASS) {
            return doc.data(*node, "tab").map(|id| ClickTarget::Leaf(id.to_string()));
        }
        if doc.has_class(*node, HEADER_CLASS) {
            return doc.data(*node, "group").map(|id| ClickTarget::GroupHeader(id.to_string()));
        }
        None
    }

    fn set_leaf_active(&mut self, leaf_id: &str, active: bool) {
        self.set_active(&leaf_element_id(leaf_id), active);
    }

    fn set_group_active(&mut self, group_id: &str, active: bool) {
        self.set_active(&group_element_id(group_id), active);
    }

    fn set_submenu_expanded(&mut self, group_id: &str, expanded: bool) {
        self.set_style_by_id(&submenu_element_id(group_id), "display", if expanded { "block" } else { "none" });
    }

    fn set_expand_indicator(&mut self, group_id: &str, expanded: bool) {
        let rotation = if expanded { ARROW_EXPANDED } else { ARROW_COLLAPSED };
        self.set_style_by_id(&arrow_element_id(group_id), "transform", rotation);
    }

    fn set_breadcrumb(&mut self, breadcrumb: &Breadcrumb) {
        let mut doc = lock(&self.document);
        if let Some(title) = doc.get_element_by_id(BREADCRUMB_TITLE_ID) {
            doc.set_text(title, &breadcrumb.title);
        }
        if let Some(subtitle) = doc.get_element_by_id(BREADCRUMB_SUBTITLE_ID) {
            doc.set_text(subtitle, &breadcrumb.subtitle);
        }
    }
}
