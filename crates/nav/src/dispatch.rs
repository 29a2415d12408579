//! Delegated click interpretation.

use tuneboard_types::ClickTarget;

use crate::view::SidebarView;

/// Walk up from `target` to the nearest leaf element or group header.
///
/// The walk stops at the sidebar root; a node outside the sidebar, or one with
/// no interpretable ancestor, yields `None`.
pub fn find_click_target<V: SidebarView>(view: &V, target: &V::Node) -> Option<ClickTarget> {
    let mut node = target.clone();
    loop {
        if let Some(found) = view.classify(&node) {
            return Some(found);
        }
        if view.is_root(&node) {
            return None;
        }
        node = view.parent(&node)?;
    }
}
