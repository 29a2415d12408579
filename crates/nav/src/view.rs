use std::fmt::Debug;

use tuneboard_types::{Breadcrumb, ClickTarget};

use crate::error::ListenerAttachError;

/// The rendered sidebar and breadcrumb, as seen by the engine.
///
/// Setters are idempotent; implementations may skip writes that do not change
/// anything.
pub trait SidebarView {
    /// A node of the rendered page that a click can originate from.
    type Node: Clone + Debug;

    /// Attach the single delegated click listener to the sidebar root.
    fn attach_listener(&mut self) -> Result<(), ListenerAttachError>;

    /// Whether `node` is the sidebar root the listener is attached to.
    fn is_root(&self, node: &Self::Node) -> bool;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Interpret `node` itself as a leaf element or group header.
    fn classify(&self, node: &Self::Node) -> Option<ClickTarget>;

    fn set_leaf_active(&mut self, leaf_id: &str, active: bool);

    fn set_group_active(&mut self, group_id: &str, active: bool);

    fn set_submenu_expanded(&mut self, group_id: &str, expanded: bool);

    /// Rotate the group header's arrow to match its submenu.
    fn set_expand_indicator(&mut self, group_id: &str, expanded: bool);

    fn set_breadcrumb(&mut self, breadcrumb: &Breadcrumb);
}
