//! One loaded control-panel page.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tuneboard_nav::{Breadcrumb, ClickTarget, Language, MenuModel, NavError, PageText, SyncEngine, page_text};

use crate::assets::PageAssets;
use crate::document::{Document, DuplicateElementId, NodeId, Patch, SharedDocument, lock};
use crate::ready::{ContentReady, ReadyError};
use crate::render::{escape_text, render_body};
use crate::sidebar::{BREADCRUMB_ID, DocumentSidebar, build_breadcrumb, build_sidebar};
use crate::tab_host::{PANEL_CLASS, TabHost, TabHostLocator};
use crate::workspace::{ContentProvider, workspace_panels};

pub type PageEngine = SyncEngine<TabHostLocator, DocumentSidebar>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error(transparent)]
    Navigation(#[from] NavError),

    #[error(transparent)]
    Ready(#[from] ReadyError),

    #[error(transparent)]
    DuplicateElementId(#[from] DuplicateElementId),

    #[error("No element with data-node {index}")]
    UnknownNode { index: usize },
}

/// Observable navigation outcome of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub active_leaf: Option<String>,
    pub expanded_group: Option<String>,
    pub breadcrumb: Option<Breadcrumb>,
    pub visible_panels: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// Result of one delegated click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickResponse {
    pub target: Option<ClickTarget>,
    pub patches: Vec<Patch>,
    pub state: PageSnapshot,
}

/// Document plus the navigation engine driving it.
#[derive(Debug)]
pub struct Page {
    document: SharedDocument,
    engine: PageEngine,
    language: Language,
    text: PageText,
    assets: Arc<PageAssets>,
}

impl Page {
    /// Build the layout, mount the workspace panels, and run navigation
    /// initialization on content ready.
    ///
    /// The resulting page already shows the default leaf; the build journal is
    /// discarded.
    pub fn load(model: Arc<MenuModel>, language: Language, assets: Arc<PageAssets>) -> Result<Self, PageError> {
        let text = page_text(language);
        let document = Document::new().into_shared();

        let main = {
            let mut doc = lock(&document);
            let body = doc.body();
            let row = doc.append_new(body, "div");
            doc.with_classes(row, &["app-row"]);

            let sidebar = doc.append_new(row, "div");
            doc.with_classes(sidebar, &["sidebar"]);
            build_sidebar(&mut doc, sidebar, &model, text.sidebar_heading, assets.logo_svg())?;

            let main = doc.append_new(row, "div");
            doc.with_classes(main, &["main-content"]);
            let title = doc.append_new(main, "div");
            doc.with_classes(title, &["top-title"]);
            doc.set_text(title, text.title);
            build_breadcrumb(&mut doc, main)?;
            main
        };

        let mut host = TabHost::build(&document, main);
        let providers = workspace_panels(&model);
        for provider in &providers {
            let handle = provider.mount(&mut host)?;
            debug!(panel_id = provider.panel_id(), node = handle.node().index(), "Mounted workspace panel");
        }

        {
            let mut doc = lock(&document);
            let footer = doc.append_new(main, "div");
            doc.with_classes(footer, &["footer"]);
            let link = doc.append_new(footer, "a");
            doc.set_text(link, text.star_prompt);
        }

        let locator = TabHostLocator::new(document.clone()).with_breadcrumb(BREADCRUMB_ID);
        let view = DocumentSidebar::new(document.clone());
        let mut engine = SyncEngine::new(model, locator, view);

        let mut ready = ContentReady::<PageEngine>::new();
        ready.register(|engine: &mut PageEngine| engine.initialize())?;
        ready.fire(&mut engine)?;

        lock(&document).take_patches();
        info!(panels = providers.len(), %language, "Page loaded");

        Ok(Self {
            document,
            engine,
            language,
            text,
            assets,
        })
    }

    /// Feed a click on `node` to the delegated listener and drain the
    /// resulting visual changes.
    pub fn click(&mut self, node: NodeId) -> ClickResponse {
        let target = self.engine.handle_click(&node);
        let patches = lock(&self.document).take_patches();
        debug!(node = node.index(), ?target, patches = patches.len(), "Click handled");
        ClickResponse {
            target,
            patches,
            state: self.snapshot(),
        }
    }

    /// Like [`Page::click`], addressing the node by its `data-node` index.
    pub fn click_index(&mut self, index: usize) -> Result<ClickResponse, PageError> {
        let node = lock(&self.document).node(index).ok_or(PageError::UnknownNode { index })?;
        Ok(self.click(node))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let state = self.engine.state();
        let visible_panels = {
            let doc = lock(&self.document);
            doc.query_class(doc.body(), PANEL_CLASS)
                .into_iter()
                .filter(|node| doc.style(*node, "display") == Some("block"))
                .filter_map(|node| doc.data(node, "panel").map(str::to_string))
                .collect()
        };
        PageSnapshot {
            active_leaf: state.active_leaf_id().map(str::to_string),
            expanded_group: state.expanded_group_id().map(str::to_string),
            breadcrumb: self.engine.breadcrumb(),
            visible_panels,
            diagnostics: self.engine.diagnostics().map(|error| error.panel_id.clone()).collect(),
        }
    }

    /// Complete HTML for this page.
    pub fn html(&self, page_id: &str) -> String {
        let body = render_body(&lock(&self.document), page_id);
        format!(
            "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<style>\n{css}\n</style>\n</head>\n{body}\n<script>\n{script}\n</script>\n</html>\n",
            lang = self.language,
            title = escape_text(self.text.window_title),
            css = self.assets.css(),
            script = self.assets.script(),
        )
    }

    pub fn engine(&self) -> &PageEngine {
        &self.engine
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }
}
