use std::fmt::Debug;

use crate::error::PanelNotFound;

/// Resolves panel ids to displayable nodes owned by an external panel host.
///
/// The host decides how panels are contained; the engine only asks for a
/// panel, its siblings, and visibility toggles.
pub trait PanelLocator {
    /// Opaque reference to a mounted panel. The engine never disposes it.
    type Handle: Clone + PartialEq + Debug;

    fn resolve(&self, panel_id: &str) -> Result<Self::Handle, PanelNotFound>;

    /// Panels sharing the container of `panel_id`, excluding the panel itself.
    /// Empty when the panel cannot be resolved.
    fn siblings_of(&self, panel_id: &str) -> Vec<Self::Handle>;

    /// Make a panel visible. Showing a visible panel is a no-op.
    fn show(&mut self, handle: &Self::Handle);

    /// Hide a panel. Hiding a hidden panel is a no-op.
    fn hide(&mut self, handle: &Self::Handle);

    /// Hide the host's own navigation chrome (tab buttons, overflow menu).
    /// Calling it more than once has no additional effect.
    fn suppress_native_controls(&mut self);
}
