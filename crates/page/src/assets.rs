//! Static page assets: logo, stylesheet and client script.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

const DEFAULT_CSS: &str = include_str!("../assets/style.css");
const PAGE_SCRIPT: &str = include_str!("../assets/page.js");
const FALLBACK_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 160 40" role="img" aria-label="Tuneboard"><rect x="2" y="6" width="28" height="28" rx="6" fill="#3d5afe"/><path d="M9 14h14M16 14v14" stroke="#ffffff" stroke-width="3" stroke-linecap="round"/><text x="40" y="27" font-family="sans-serif" font-size="18" font-weight="700" fill="#1f2330">Tuneboard</text></svg>"##;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to read {kind} file '{path}': {source}")]
    Io {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Assets shared by every page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAssets {
    logo_svg: String,
    css: String,
}

impl Default for PageAssets {
    fn default() -> Self {
        Self {
            logo_svg: FALLBACK_LOGO.to_string(),
            css: DEFAULT_CSS.to_string(),
        }
    }
}

impl PageAssets {
    /// Read the optional logo and stylesheet overrides; missing ones fall back
    /// to the built-in assets.
    pub fn load(logo: Option<&Path>, css: Option<&Path>) -> Result<Self, AssetError> {
        let mut assets = Self::default();
        if let Some(path) = logo {
            assets.logo_svg = read_asset("logo", path)?;
        }
        if let Some(path) = css {
            assets.css = read_asset("stylesheet", path)?;
        }
        Ok(assets)
    }

    pub fn logo_svg(&self) -> &str {
        &self.logo_svg
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn script(&self) -> &'static str {
        PAGE_SCRIPT
    }
}

fn read_asset(kind: &'static str, path: &Path) -> Result<String, AssetError> {
    debug!(kind, path = %path.display(), "Loading page asset");
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        kind,
        path: path.display().to_string(),
        source,
    })
}
