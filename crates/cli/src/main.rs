use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tuneboard_nav::{Language, builtin_menu, load_menu_from_path};
use tuneboard_page::{Page, PageAssets};
use tuneboard_server::{ControlPanelServer, DEFAULT_HOST, DEFAULT_MAX_SESSIONS, DEFAULT_PORT, LaunchSettings};

/// Serve the Tuneboard control panel.
#[derive(Parser, Debug)]
#[command(name = "tuneboard", version, about)]
struct Args {
    /// Address to bind (overridden by WEBUI_SERVER)
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind (overridden by WEBUI_PORT)
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Make the panel reachable from the network (overridden by WEBUI_SHARE)
    #[arg(long)]
    share: bool,

    /// UI language, zh or en (overridden by SWIFT_UI_LANG)
    #[arg(long, default_value_t = Language::Zh)]
    lang: Language,

    /// JSON or YAML menu file replacing the built-in workspaces
    #[arg(long, value_name = "FILE")]
    menu: Option<PathBuf>,

    /// Leaf selected when a page loads
    #[arg(long, value_name = "LEAF_ID")]
    default_leaf: Option<String>,

    /// SVG logo shown above the sidebar
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Stylesheet replacing the built-in one
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Maximum number of open pages kept in memory
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS)]
    max_sessions: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let settings = LaunchSettings {
        host: args.host,
        port: args.port,
        share: args.share,
        language: args.lang,
    }
    .with_env_overrides()?;
    let bind_address = settings.bind_address()?;

    let mut model = match &args.menu {
        Some(path) => load_menu_from_path(path).with_context(|| format!("failed to load menu {}", path.display()))?,
        None => builtin_menu(settings.language)?,
    };
    if let Some(leaf_id) = &args.default_leaf {
        model = model.with_default_leaf(leaf_id)?;
    }
    let model = Arc::new(model);
    let assets = Arc::new(PageAssets::load(args.logo.as_deref(), args.css.as_deref())?);
    // Every request renders the same menu; fail here instead of on each page load.
    Page::load(Arc::clone(&model), settings.language, Arc::clone(&assets)).context("menu cannot be rendered")?;

    let server = ControlPanelServer::new(bind_address, model, settings.language, assets)
        .with_max_sessions(args.max_sessions)
        .start()
        .await?;
    info!(url = %format!("http://{}", server.bound_address()), share = settings.share, "Tuneboard is ready");

    tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
    info!("Shutting down");
    server.stop().await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_launch_flags() {
        let args = Args::try_parse_from(["tuneboard", "--port", "8082", "--share", "--lang", "en", "--default-leaf", "llm_infer"])
            .expect("valid flags");
        assert_eq!(args.port, 8082);
        assert!(args.share);
        assert_eq!(args.lang, Language::En);
        assert_eq!(args.host, DEFAULT_HOST);
        assert_eq!(args.default_leaf.as_deref(), Some("llm_infer"));
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(Args::try_parse_from(["tuneboard", "--lang", "fr"]).is_err());
    }
}
