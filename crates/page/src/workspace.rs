//! Content providers for the task workspaces.

use tuneboard_nav::{MenuLeaf, MenuModel};

use crate::document::{DuplicateElementId, lock};
use crate::tab_host::{PanelHandle, TabHost};

/// Owner of one content panel.
///
/// The provider's `panel_id` equals the leaf id it is navigated by; the tab
/// host derives the element id from it.
pub trait ContentProvider: Send + Sync {
    fn panel_id(&self) -> &str;

    /// Mount the panel (and its content) into the tab host.
    fn mount(&self, host: &mut TabHost) -> Result<PanelHandle, DuplicateElementId>;
}

/// Placeholder workspace panel showing the leaf's label and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePanel {
    panel_id: String,
    label: String,
    description: String,
}

impl WorkspacePanel {
    pub fn from_leaf(leaf: &MenuLeaf) -> Self {
        Self {
            panel_id: leaf.id.clone(),
            label: leaf.label.clone(),
            description: leaf.subtitle.clone(),
        }
    }
}

impl ContentProvider for WorkspacePanel {
    fn panel_id(&self) -> &str {
        &self.panel_id
    }

    fn mount(&self, host: &mut TabHost) -> Result<PanelHandle, DuplicateElementId> {
        let handle = host.add_tab(&self.panel_id, &self.label)?;
        let mut doc = lock(host.document());
        let body = doc.append_new(handle.node(), "div");
        doc.with_classes(body, &["workspace"]);

        let heading = doc.append_new(body, "h2");
        doc.with_classes(heading, &["workspace-title"]);
        doc.set_text(heading, &self.label);

        if !self.description.is_empty() {
            let description = doc.append_new(body, "p");
            doc.with_classes(description, &["workspace-description"]);
            doc.set_text(description, &self.description);
        }
        Ok(handle)
    }
}

/// One placeholder provider per leaf, in menu order.
pub fn workspace_panels(model: &MenuModel) -> Vec<WorkspacePanel> {
    model.leaves().map(WorkspacePanel::from_leaf).collect()
}
