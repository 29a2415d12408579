//! The side-effecting half of navigation.
//!
//! [`SyncEngine`] owns the page's single [`NavigationState`]. Every handler
//! computes the next state with a pure transition, commits it, and then
//! re-renders panels and sidebar from the committed state.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};
use tuneboard_types::{Breadcrumb, ClickTarget};

use crate::dispatch::find_click_target;
use crate::error::{NavError, PanelNotFound};
use crate::locator::PanelLocator;
use crate::model::MenuModel;
use crate::state::{NavigationState, Transition};
use crate::view::SidebarView;

const MAX_DIAGNOSTICS: usize = 32;

/// Navigation engine for one loaded page.
#[derive(Debug)]
pub struct SyncEngine<L: PanelLocator, V: SidebarView> {
    model: Arc<MenuModel>,
    locator: L,
    view: V,
    state: NavigationState,
    initialized: bool,
    diagnostics: VecDeque<PanelNotFound>,
}

impl<L: PanelLocator, V: SidebarView> SyncEngine<L, V> {
    /// Create an engine in the `(none, none)` state. Nothing is rendered until
    /// [`SyncEngine::initialize`] runs.
    pub fn new(model: Arc<MenuModel>, locator: L, view: V) -> Self {
        Self {
            model,
            locator,
            view,
            state: NavigationState::new(),
            initialized: false,
            diagnostics: VecDeque::new(),
        }
    }

    /// Attach the delegated listener, hide the host's native controls, and
    /// apply the initial load.
    ///
    /// The listener is attached first so a missing sidebar root fails before
    /// the host is touched.
    ///
    /// Must run once the menu and panels exist. A second call is ignored.
    pub fn initialize(&mut self) -> Result<(), NavError> {
        if self.initialized {
            warn!("Navigation engine already initialized; ignoring repeated content-ready signal");
            return Ok(());
        }

        self.view.attach_listener()?;
        self.locator.suppress_native_controls();
        let next = self.state.apply(&self.model, &Transition::InitialLoad)?;
        self.initialized = true;
        self.commit_selection(next);

        info!(
            default_leaf = %self.model.default_leaf_id(),
            "Navigation engine initialized"
        );
        Ok(())
    }

    /// Entry point of the delegated sidebar listener.
    ///
    /// Returns what the click was interpreted as; `None` when it was ignored.
    pub fn handle_click(&mut self, target: &V::Node) -> Option<ClickTarget> {
        if !self.initialized {
            debug!(?target, "Click ignored: listener not attached yet");
            return None;
        }

        let found = find_click_target(&self.view, target);
        match &found {
            Some(ClickTarget::Leaf(leaf_id)) => self.handle_leaf_click(leaf_id),
            Some(ClickTarget::GroupHeader(group_id)) => self.handle_group_header_click(group_id),
            None => debug!(?target, "Click outside any leaf or group header"),
        }
        found
    }

    /// Select a leaf, show its panel, and re-render the sidebar.
    ///
    /// Never fails: an unknown leaf or a missing panel is logged and recorded.
    pub fn handle_leaf_click(&mut self, leaf_id: &str) {
        match self.state.select_leaf(&self.model, leaf_id) {
            Ok(next) => self.commit_selection(next),
            Err(error) => {
                warn!(%leaf_id, %error, "Leaf click does not match any menu entry");
                self.record(PanelNotFound::new(leaf_id));
            }
        }
    }

    /// Expand a group's submenu and collapse the others. No panel changes.
    pub fn handle_group_header_click(&mut self, group_id: &str) {
        match self.state.toggle_group(&self.model, group_id) {
            Ok(next) => {
                debug!(%group_id, "Group expanded");
                self.state = next;
                self.render_sidebar();
            }
            Err(error) => warn!(%group_id, %error, "Ignoring click on unknown group header"),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn breadcrumb(&self) -> Option<Breadcrumb> {
        self.state.breadcrumb(&self.model)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Recently recorded `PanelNotFound` conditions, oldest first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &PanelNotFound> {
        self.diagnostics.iter()
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn commit_selection(&mut self, next: NavigationState) {
        self.state = next;
        let Some(leaf_id) = self.state.active_leaf_id().map(str::to_owned) else {
            return;
        };
        debug!(%leaf_id, expanded_group = ?self.state.expanded_group_id(), "Leaf selected");

        // The sidebar follows the state even when the panel is missing.
        if let Err(missing) = self.show_only(&leaf_id) {
            warn!(panel_id = %missing.panel_id, "Panel not found; visible panel unchanged");
            self.record(missing);
        }
        self.render_sidebar();
    }

    fn show_only(&mut self, panel_id: &str) -> Result<(), PanelNotFound> {
        let handle = self.locator.resolve(panel_id)?;
        for sibling in self.locator.siblings_of(panel_id) {
            if sibling != handle {
                self.locator.hide(&sibling);
            }
        }
        self.locator.show(&handle);
        Ok(())
    }

    fn render_sidebar(&mut self) {
        let active_leaf = self.state.active_leaf_id();
        let active_group = self.state.active_group_id(&self.model);
        let expanded_group = self.state.expanded_group_id();

        for group in self.model.groups() {
            let expanded = expanded_group == Some(group.id.as_str());
            self.view.set_group_active(&group.id, active_group == Some(group.id.as_str()));
            self.view.set_submenu_expanded(&group.id, expanded);
            self.view.set_expand_indicator(&group.id, expanded);
            for leaf_id in &group.leaf_ids {
                self.view.set_leaf_active(leaf_id, active_leaf == Some(leaf_id.as_str()));
            }
        }

        if let Some(breadcrumb) = self.state.breadcrumb(&self.model) {
            self.view.set_breadcrumb(&breadcrumb);
        }
    }

    fn record(&mut self, missing: PanelNotFound) {
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(missing);
    }
}
