//! Generic tab container hosting the workspace panels.
//!
//! The host renders its own tab buttons and overflow menu and shows the first
//! tab by default, like a stock tab widget. [`TabHostLocator`] is the only code
//! that knows this structure.

use tracing::{debug, warn};
use tuneboard_nav::{PanelLocator, PanelNotFound};

use crate::document::{DuplicateElementId, NodeId, SharedDocument, lock};

/// Class carried by every panel element.
pub const PANEL_CLASS: &str = "tabitem";
pub const WRAPPER_CLASS: &str = "tab-wrapper";
pub const NATIVE_TABS_CLASS: &str = "tab-container";
pub const OVERFLOW_CLASS: &str = "overflow-menu";

/// Element id of the panel mounted for `panel_id`. The prefix keeps panel ids
/// apart from sidebar and breadcrumb ids.
pub fn panel_element_id(panel_id: &str) -> String {
    format!("panel-{panel_id}")
}

const HIDDEN_CHROME_STYLE: &[(&str, &str)] = &[
    ("visibility", "hidden"),
    ("position", "absolute"),
    ("left", "-9999px"),
    ("height", "0"),
    ("width", "0"),
    ("margin", "0"),
    ("padding", "0"),
];

/// Reference to a mounted panel element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelHandle(NodeId);

impl PanelHandle {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

/// Builder side of the tab host, used by content providers to mount panels.
#[derive(Debug)]
pub struct TabHost {
    document: SharedDocument,
    native_tabs: NodeId,
    panels: NodeId,
}

impl TabHost {
    /// Build the wrapper, native tab strip, overflow menu and panel container under `parent`.
    pub fn build(document: &SharedDocument, parent: NodeId) -> Self {
        let mut doc = lock(document);
        let wrapper = doc.append_new(parent, "div");
        doc.with_classes(wrapper, &[WRAPPER_CLASS]);
        let native_tabs = doc.append_new(wrapper, "div");
        doc.with_classes(native_tabs, &[NATIVE_TABS_CLASS]);
        doc.set_data(native_tabs, "role", "tablist");
        let overflow = doc.append_new(wrapper, "div");
        doc.with_classes(overflow, &[OVERFLOW_CLASS]);
        let panels = doc.append_new(wrapper, "div");
        doc.with_classes(panels, &["tab-panels"]);
        drop(doc);

        Self {
            document: document.clone(),
            native_tabs,
            panels,
        }
    }

    /// Add a native tab button and its (initially hidden unless first) panel.
    /// The panel's element id is [`panel_element_id`]; `data-panel` carries the bare id.
    pub fn add_tab(&mut self, panel_id: &str, label: &str) -> Result<PanelHandle, DuplicateElementId> {
        let element_id = panel_element_id(panel_id);
        let mut doc = lock(&self.document);
        if doc.get_element_by_id(&element_id).is_some() {
            return Err(DuplicateElementId { id: element_id });
        }
        let first = doc.children(self.panels).is_empty();

        let button = doc.append_new(self.native_tabs, "button");
        doc.with_classes(button, &["tab-nav--item"]);
        doc.set_data(button, "controls", &element_id);
        doc.set_text(button, label);

        let panel = doc.append_new(self.panels, "div");
        doc.with_classes(panel, &[PANEL_CLASS]);
        doc.set_dom_id(panel, &element_id)?;
        doc.set_data(panel, "panel", panel_id);
        doc.set_style(panel, "display", if first { "block" } else { "none" });
        Ok(PanelHandle(panel))
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }
}

/// [`PanelLocator`] over the tab host's document structure.
#[derive(Debug)]
pub struct TabHostLocator {
    document: SharedDocument,
    breadcrumb_id: Option<String>,
    suppressed: bool,
}

impl TabHostLocator {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            breadcrumb_id: None,
            suppressed: false,
        }
    }

    /// Move this element to the top of the tab wrapper when suppressing native controls.
    pub fn with_breadcrumb(mut self, element_id: impl Into<String>) -> Self {
        self.breadcrumb_id = Some(element_id.into());
        self
    }

    pub fn native_controls_suppressed(&self) -> bool {
        self.suppressed
    }
}

impl PanelLocator for TabHostLocator {
    type Handle = PanelHandle;

    fn resolve(&self, panel_id: &str) -> Result<PanelHandle, PanelNotFound> {
        let doc = lock(&self.document);
        doc.get_element_by_id(&panel_element_id(panel_id))
            .filter(|node| doc.has_class(*node, PANEL_CLASS))
            .map(PanelHandle)
            .ok_or_else(|| PanelNotFound::new(panel_id))
    }

    fn siblings_of(&self, panel_id: &str) -> Vec<PanelHandle> {
        let Ok(handle) = self.resolve(panel_id) else {
            return Vec::new();
        };
        let doc = lock(&self.document);
        let Some(container) = doc.parent(handle.0) else {
            return Vec::new();
        };
        doc.children(container)
            .iter()
            .copied()
            .filter(|node| *node != handle.0 && doc.has_class(*node, PANEL_CLASS))
            .map(PanelHandle)
            .collect()
    }

    fn show(&mut self, handle: &PanelHandle) {
        lock(&self.document).set_style(handle.0, "display", "block");
    }

    fn hide(&mut self, handle: &PanelHandle) {
        lock(&self.document).set_style(handle.0, "display", "none");
    }

    fn suppress_native_controls(&mut self) {
        if self.suppressed {
            return;
        }
        self.suppressed = true;

        let mut doc = lock(&self.document);
        let body = doc.body();
        let Some(wrapper) = doc.query_class(body, WRAPPER_CLASS).into_iter().next() else {
            warn!("Tab wrapper not found; native tab controls left as rendered");
            return;
        };

        if let Some(tag) = self.breadcrumb_id.as_deref().and_then(|id| doc.get_element_by_id(id)) {
            let first = doc.children(wrapper).first().copied();
            doc.insert_before(wrapper, tag, first);
        }

        let mut chrome = doc.query_class(wrapper, NATIVE_TABS_CLASS);
        chrome.extend(doc.query_class(wrapper, OVERFLOW_CLASS));
        for node in &chrome {
            for (property, value) in HIDDEN_CHROME_STYLE {
                doc.set_style(*node, property, value);
            }
        }
        debug!(hidden = chrome.len(), "Suppressed native tab controls");
    }
}
