//! HTTP host for the Tuneboard control panel.
//!
//! Each `GET /` loads a fresh [`tuneboard_page::Page`] into its own session;
//! the page script posts sidebar clicks back and replays the returned patches.

mod http;
mod sessions;
mod settings;

pub use http::{AppState, ControlPanelServer, RunningControlPanelServer, ServerError, router};
pub use sessions::{DEFAULT_MAX_SESSIONS, PageId, PageSessions, SharedPage};
pub use settings::{
    DEFAULT_HOST, DEFAULT_PORT, LANG_ENV, LaunchSettings, PORT_ENV, SERVER_ENV, SHARE_ENV, SettingsError, parse_bool,
};
