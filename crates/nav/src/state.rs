//! Navigation state and its pure transitions.
//!
//! Transitions never mutate in place: each returns the next state, so a
//! failed precondition leaves the current state untouched.

use serde::Serialize;
use tuneboard_types::Breadcrumb;

use crate::error::NavError;
use crate::model::MenuModel;

/// A navigation intent applied to [`NavigationState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Activate a leaf and expand its group.
    SelectLeaf(String),
    /// Expand a group without changing the active leaf.
    ToggleGroup(String),
    /// Select the model's default leaf; fired once per page load.
    InitialLoad,
}

/// Which leaf is active and which group is expanded.
///
/// The active leaf's group is the expanded group except right after a
/// group-header click, which moves expansion only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    active_leaf_id: Option<String>,
    expanded_group_id: Option<String>,
}

impl NavigationState {
    /// The initial `(none, none)` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_leaf_id(&self) -> Option<&str> {
        self.active_leaf_id.as_deref()
    }

    pub fn expanded_group_id(&self) -> Option<&str> {
        self.expanded_group_id.as_deref()
    }

    /// Id of the group owning the active leaf, if any.
    pub fn active_group_id<'m>(&self, model: &'m MenuModel) -> Option<&'m str> {
        let leaf_id = self.active_leaf_id.as_deref()?;
        model.leaf_by_id(leaf_id).ok().map(|leaf| leaf.group_id.as_str())
    }

    /// Breadcrumb text derived from the active leaf.
    pub fn breadcrumb(&self, model: &MenuModel) -> Option<Breadcrumb> {
        let leaf_id = self.active_leaf_id.as_deref()?;
        let leaf = model.leaf_by_id(leaf_id).ok()?;
        Some(Breadcrumb {
            title: leaf.label.clone(),
            subtitle: leaf.subtitle.clone(),
        })
    }

    /// Apply a transition, returning the next state.
    pub fn apply(&self, model: &MenuModel, transition: &Transition) -> Result<Self, NavError> {
        match transition {
            Transition::SelectLeaf(leaf_id) => self.select_leaf(model, leaf_id),
            Transition::ToggleGroup(group_id) => self.toggle_group(model, group_id),
            Transition::InitialLoad => self.select_leaf(model, model.default_leaf_id()),
        }
    }

    pub fn select_leaf(&self, model: &MenuModel, leaf_id: &str) -> Result<Self, NavError> {
        let group = model.group_of(leaf_id)?;
        Ok(Self {
            active_leaf_id: Some(leaf_id.to_string()),
            expanded_group_id: Some(group.id.clone()),
        })
    }

    /// Expanding the already expanded group is a no-op; the active leaf's
    /// group therefore can never be collapsed by its own header.
    pub fn toggle_group(&self, model: &MenuModel, group_id: &str) -> Result<Self, NavError> {
        let group = model.group_by_id(group_id)?;
        if self.expanded_group_id.as_deref() == Some(group.id.as_str()) {
            return Ok(self.clone());
        }
        Ok(Self {
            active_leaf_id: self.active_leaf_id.clone(),
            expanded_group_id: Some(group.id.clone()),
        })
    }
}
