//! HTTP host serving control-panel pages.

use std::net::SocketAddr;
use std::sync::{Arc, PoisonError};

use anyhow::{Context, Result, anyhow};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tuneboard_nav::{Language, MenuModel};
use tuneboard_page::{ClickResponse, Page, PageAssets, PageError, PageSnapshot};

use crate::sessions::{DEFAULT_MAX_SESSIONS, PageId, PageSessions, SharedPage};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Page {id} not found")]
    PageNotFound { id: PageId },

    #[error(transparent)]
    Page(#[from] PageError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Page(PageError::UnknownNode { .. }) => StatusCode::BAD_REQUEST,
            ServerError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared state behind every route.
#[derive(Debug, Clone)]
pub struct AppState {
    model: Arc<MenuModel>,
    language: Language,
    assets: Arc<PageAssets>,
    sessions: Arc<PageSessions>,
}

impl AppState {
    pub fn new(model: Arc<MenuModel>, language: Language, assets: Arc<PageAssets>, sessions: Arc<PageSessions>) -> Self {
        Self {
            model,
            language,
            assets,
            sessions,
        }
    }

    fn page(&self, id: PageId) -> Result<SharedPage, ServerError> {
        self.sessions.get(id).ok_or(ServerError::PageNotFound { id })
    }
}

#[derive(Debug, Deserialize)]
struct ClickRequest {
    target: usize,
}

/// Build the control-panel router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(load_page))
        .route("/healthz", get(healthz))
        .route("/pages/{id}", delete(close_page))
        .route("/pages/{id}/click", post(click))
        .route("/pages/{id}/state", get(page_state))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn load_page(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let page = Page::load(Arc::clone(&state.model), state.language, Arc::clone(&state.assets))?;
    let (id, page) = state.sessions.insert(page);
    let html = page.lock().unwrap_or_else(PoisonError::into_inner).html(&id.to_string());
    Ok(Html(html))
}

async fn click(State(state): State<AppState>, Path(id): Path<PageId>, Json(request): Json<ClickRequest>) -> Result<Json<ClickResponse>, ServerError> {
    let page = state.page(id)?;
    let response = page.lock().unwrap_or_else(PoisonError::into_inner).click_index(request.target)?;
    Ok(Json(response))
}

async fn page_state(State(state): State<AppState>, Path(id): Path<PageId>) -> Result<Json<PageSnapshot>, ServerError> {
    let page = state.page(id)?;
    let snapshot = page.lock().unwrap_or_else(PoisonError::into_inner).snapshot();
    Ok(Json(snapshot))
}

async fn close_page(State(state): State<AppState>, Path(id): Path<PageId>) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::PageNotFound { id })
    }
}

/// Host configuration for the control-panel server.
#[derive(Debug, Clone)]
pub struct ControlPanelServer {
    bind_address: SocketAddr,
    model: Arc<MenuModel>,
    language: Language,
    assets: Arc<PageAssets>,
    max_sessions: usize,
}

impl ControlPanelServer {
    pub fn new(bind_address: SocketAddr, model: Arc<MenuModel>, language: Language, assets: Arc<PageAssets>) -> Self {
        Self {
            bind_address,
            model,
            language,
            assets,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Cap the number of open pages; the oldest is evicted first.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Bind and start serving; returns a handle for inspection and shutdown.
    pub async fn start(self) -> Result<RunningControlPanelServer> {
        let sessions = Arc::new(PageSessions::new(self.max_sessions));
        let state = AppState::new(self.model, self.language, self.assets, Arc::clone(&sessions));

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .with_context(|| format!("failed to bind control panel to {}", self.bind_address))?;
        let bound_address = listener.local_addr()?;

        let cancellation_token = CancellationToken::new();
        let server_handle = tokio::spawn({
            let shutdown = cancellation_token.child_token();
            let router = router(state);
            async move {
                if let Err(error) = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await
                {
                    warn!(%error, "Control panel server stopped with an error");
                }
            }
        });

        info!(address = %bound_address, "Control panel listening");
        Ok(RunningControlPanelServer {
            bind_address: bound_address,
            cancellation_token,
            server_handle,
            sessions,
        })
    }
}

/// Runtime handle for a running control-panel server.
#[derive(Debug)]
pub struct RunningControlPanelServer {
    bind_address: SocketAddr,
    cancellation_token: CancellationToken,
    server_handle: JoinHandle<()>,
    sessions: Arc<PageSessions>,
}

impl RunningControlPanelServer {
    pub fn bound_address(&self) -> SocketAddr {
        self.bind_address
    }

    pub fn open_pages(&self) -> usize {
        self.sessions.len()
    }

    /// Stop accepting requests and wait for in-flight ones to finish.
    pub async fn stop(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.server_handle
            .await
            .map_err(|error| anyhow!("control panel server task failed: {error}"))?;
        info!("Control panel stopped");
        Ok(())
    }
}
