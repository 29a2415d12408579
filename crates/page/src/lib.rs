//! Server-side page for the Tuneboard control panel.
//!
//! A [`Page`] owns an in-memory [`Document`] standing in for the browser DOM,
//! the tab host the workspace panels are mounted into, and the navigation
//! engine wired to both through [`TabHostLocator`] and [`DocumentSidebar`].
//! Clicks come back from the browser as `data-node` indexes; the visual
//! changes they cause are returned as [`Patch`]es for the client to replay.

mod assets;
mod document;
mod page;
mod ready;
mod render;
mod sidebar;
mod tab_host;
mod workspace;

pub use assets::{AssetError, PageAssets};
pub use document::{Document, DuplicateElementId, NodeId, Patch, PatchOp, SharedDocument, lock};
pub use page::{ClickResponse, Page, PageEngine, PageError, PageSnapshot};
pub use ready::{ContentReady, ReadyError};
pub use render::{escape_text, render_body};
pub use sidebar::{DocumentSidebar, SIDEBAR_ROOT_ID, build_breadcrumb, build_sidebar};
pub use tab_host::{PanelHandle, TabHost, TabHostLocator, panel_element_id};
pub use workspace::{ContentProvider, WorkspacePanel, workspace_panels};
