//! Navigation state synchronization engine for the Tuneboard control panel.
//!
//! The crate maps a two-level menu (groups of leaves) onto a flat set of
//! content panels and keeps the sidebar, the breadcrumb and the visible panel
//! consistent with a single [`NavigationState`].
//!
//! Modules:
//! - `model`: immutable menu tree and its construction-time validation
//! - `state`: navigation state and pure transitions
//! - `locator`: contract for the external panel host
//! - `view`: contract for the rendered sidebar
//! - `dispatch`: delegated click interpretation
//! - `engine`: the side-effecting [`SyncEngine`]
//! - `catalog`: built-in workspace menu and page locale text
//! - `config`: menu files in JSON or YAML

mod catalog;
mod config;
mod dispatch;
mod engine;
mod error;
mod locator;
mod model;
mod state;
mod view;

#[cfg(test)]
mod fake;

pub use catalog::{DEFAULT_LEAF_ID, PageText, builtin_menu, page_text};
pub use config::{GroupEntry, LeafEntry, MenuDocument, MenuFormat, MenuLoadError, load_menu_from_path, load_menu_from_str};
pub use dispatch::find_click_target;
pub use engine::SyncEngine;
pub use error::{ConfigurationError, ListenerAttachError, NavError, PanelNotFound};
pub use locator::PanelLocator;
pub use model::{MenuBuilder, MenuModel, validate_dom_id};
pub use state::{NavigationState, Transition};
pub use view::SidebarView;

pub use tuneboard_types::{Breadcrumb, ClickTarget, Language, MenuGroup, MenuLeaf};
